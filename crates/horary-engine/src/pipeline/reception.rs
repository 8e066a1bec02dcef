//! Reception Calculator: the single source of truth for essential-
//! dignity reception between two bodies. Every other stage — perfection,
//! translation, collection, prohibition-softening, display strings — must
//! call into this module rather than re-deriving reception itself.

use horary_core::{HoraryChart, Planet, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DignityKind {
    Domicile,
    Exaltation,
    Triplicity,
}

impl DignityKind {
    fn label(&self) -> &'static str {
        match self {
            DignityKind::Domicile => "rulership",
            DignityKind::Exaltation => "exaltation",
            DignityKind::Triplicity => "triplicity",
        }
    }

    /// Strength used for the `Unilateral` case's "top dignity" lookup.
    fn unilateral_strength(&self) -> u8 {
        match self {
            DignityKind::Domicile => 5,
            DignityKind::Exaltation => 4,
            DignityKind::Triplicity => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceptionKind {
    None,
    MutualRulership,
    MutualExaltation,
    MixedReception,
    Unilateral,
}

#[derive(Debug, Clone)]
pub struct Reception {
    pub a: Planet,
    pub b: Planet,
    /// Dignities by which `b`'s position is dignified for `a` (i.e. `a`
    /// receives `b`).
    pub a_receives_b: Vec<DignityKind>,
    /// Dignities by which `a`'s position is dignified for `b`.
    pub b_receives_a: Vec<DignityKind>,
    pub kind: ReceptionKind,
    pub strength: u8,
}

impl Reception {
    pub fn is_reception(&self) -> bool {
        self.kind != ReceptionKind::None
    }

    pub fn is_mutual(&self) -> bool {
        matches!(
            self.kind,
            ReceptionKind::MutualRulership | ReceptionKind::MutualExaltation
        )
    }

    /// Either planet appears in the other's dignity set.
    pub fn receives(&self, receiver: Planet) -> bool {
        if receiver == self.a {
            !self.a_receives_b.is_empty()
        } else if receiver == self.b {
            !self.b_receives_a.is_empty()
        } else {
            false
        }
    }

    pub fn display(&self) -> String {
        match self.kind {
            ReceptionKind::None => format!("{} and {} have no reception", self.a.name(), self.b.name()),
            ReceptionKind::MutualRulership => format!(
                "{} and {} are in mutual reception by rulership",
                self.a.name(),
                self.b.name()
            ),
            ReceptionKind::MutualExaltation => format!(
                "{} and {} are in mutual reception by exaltation",
                self.a.name(),
                self.b.name()
            ),
            ReceptionKind::MixedReception => format!(
                "{} and {} are in mixed reception ({} receives by {}, {} receives by {})",
                self.a.name(),
                self.b.name(),
                self.a.name(),
                dignity_labels(&self.a_receives_b),
                self.b.name(),
                dignity_labels(&self.b_receives_a),
            ),
            ReceptionKind::Unilateral => {
                if !self.a_receives_b.is_empty() {
                    format!(
                        "{} receives {} by {}",
                        self.a.name(),
                        self.b.name(),
                        dignity_labels(&self.a_receives_b)
                    )
                } else {
                    format!(
                        "{} receives {} by {}",
                        self.b.name(),
                        self.a.name(),
                        dignity_labels(&self.b_receives_a)
                    )
                }
            }
        }
    }
}

fn dignity_labels(dignities: &[DignityKind]) -> String {
    dignities
        .iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Dignities by which `candidate` dignifies a body sitting in `sign`.
fn dignities_for(sign: Sign, candidate: Planet, is_day_chart: bool) -> Vec<DignityKind> {
    let mut dignities = Vec::new();
    if sign.ruler() == candidate {
        dignities.push(DignityKind::Domicile);
    }
    if candidate.exaltation() == Some(sign) {
        dignities.push(DignityKind::Exaltation);
    }
    if sign.triplicity_ruler(is_day_chart) == candidate {
        dignities.push(DignityKind::Triplicity);
    }
    dignities
}

/// Compute the reception between two bodies in this chart. Day/night
/// is decided by the Sun's house per [`HoraryChart::is_day_chart`].
pub fn reception_between(chart: &HoraryChart, a: Planet, b: Planet) -> Reception {
    let is_day = chart.is_day_chart();
    let sign_a = chart.position(a).sign;
    let sign_b = chart.position(b).sign;

    let a_receives_b = dignities_for(sign_b, a, is_day);
    let b_receives_a = dignities_for(sign_a, b, is_day);

    let kind = if b_receives_a.contains(&DignityKind::Domicile) && a_receives_b.contains(&DignityKind::Domicile) {
        ReceptionKind::MutualRulership
    } else if b_receives_a.contains(&DignityKind::Exaltation) && a_receives_b.contains(&DignityKind::Exaltation) {
        ReceptionKind::MutualExaltation
    } else if !b_receives_a.is_empty() && !a_receives_b.is_empty() {
        ReceptionKind::MixedReception
    } else if !b_receives_a.is_empty() || !a_receives_b.is_empty() {
        ReceptionKind::Unilateral
    } else {
        ReceptionKind::None
    };

    let strength = match kind {
        ReceptionKind::MutualRulership => 10,
        ReceptionKind::MutualExaltation => 8,
        ReceptionKind::MixedReception => 6,
        ReceptionKind::Unilateral => {
            let top = a_receives_b
                .iter()
                .chain(b_receives_a.iter())
                .map(DignityKind::unilateral_strength)
                .max()
                .unwrap_or(2);
            top
        }
        ReceptionKind::None => 0,
    };

    Reception {
        a,
        b,
        a_receives_b,
        b_receives_a,
        kind,
        strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chart_with_positions;
    use horary_core::Sign;

    #[test]
    fn mutual_rulership_when_each_sits_in_the_others_domicile() {
        // Mars in Taurus (Venus's sign), Venus in Aries (Mars's sign).
        let chart = chart_with_positions(vec![(Planet::Mars, Sign::Taurus, 10.0), (Planet::Venus, Sign::Aries, 10.0)]);
        let reception = reception_between(&chart, Planet::Mars, Planet::Venus);
        assert_eq!(reception.kind, ReceptionKind::MutualRulership);
        assert_eq!(reception.strength, 10);
    }

    #[test]
    fn none_when_neither_dignifies_the_other() {
        let chart = chart_with_positions(vec![(Planet::Mars, Sign::Gemini, 10.0), (Planet::Venus, Sign::Capricorn, 10.0)]);
        let reception = reception_between(&chart, Planet::Mars, Planet::Venus);
        assert_eq!(reception.kind, ReceptionKind::None);
        assert!(!reception.is_reception());
    }

    #[test]
    fn unilateral_when_only_one_direction_dignifies() {
        // Mars in Leo (no dignity for/from Venus there), Venus in Aries (Mars's domicile).
        let chart = chart_with_positions(vec![(Planet::Mars, Sign::Leo, 10.0), (Planet::Venus, Sign::Aries, 10.0)]);
        let reception = reception_between(&chart, Planet::Mars, Planet::Venus);
        assert_eq!(reception.kind, ReceptionKind::Unilateral);
    }
}
