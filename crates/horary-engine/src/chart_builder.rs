//! Chart Builder: orchestrates the `Ephemeris`/`Geocoder`/`TimezoneResolver`
//! collaborators and assembles the immutable [`HoraryChart`].
//! This is the only module in the crate that performs (or delegates) I/O;
//! every pipeline stage downstream of it is pure.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use horary_config::Configuration;
use horary_core::{HoraryChart, HoraryError, Planet, PlanetPosition, Settings};

use crate::collaborators::{Collaborators, ResolvedVia};
use crate::datetime::{julian_day, parse_local_datetime, parse_timezone, resolve_in_zone};
use crate::houses::house_for_longitude;
use crate::pipeline::aspects::compute_aspects;
use crate::pipeline::dignity::score_dignity;
use crate::pipeline::moon::moon_story;
use crate::pipeline::solar::compute_solar_conditions;

/// Resolved place/time inputs, separated from chart assembly so
/// `judge()` can short-circuit on a `LocationError`/`InputError` before any
/// ephemeris call.
pub struct ResolvedMoment {
    pub local_datetime: NaiveDateTime,
    pub utc_datetime: chrono::DateTime<chrono::Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub timezone: String,
    pub resolved_via: ResolvedVia,
}

/// Resolve location + local time into one absolute moment. Geocodes
/// only when `settings.location` is given instead of explicit coordinates;
/// resolves the timezone from coordinates unless the caller supplied one.
pub fn resolve_moment(settings: &Settings, collaborators: &Collaborators) -> Result<ResolvedMoment, HoraryError> {
    let (latitude, longitude, location_name) = if settings.uses_coordinates() {
        (
            settings.latitude.unwrap(),
            settings.longitude.unwrap(),
            "manual coordinates".to_string(),
        )
    } else {
        let location = settings
            .location
            .as_deref()
            .ok_or_else(|| HoraryError::input("settings must provide either `location` or `latitude`/`longitude`"))?;
        let geocoded = collaborators.geocoder.geocode(location)?;
        tracing::info!(location, lat = geocoded.latitude, lon = geocoded.longitude, "geocoded question location");
        (geocoded.latitude, geocoded.longitude, geocoded.canonical_name)
    };

    let (timezone_name, resolved_via) = if let Some(tz) = &settings.timezone {
        (tz.clone(), ResolvedVia::Primary)
    } else {
        let resolution = collaborators.timezone_resolver.resolve(latitude, longitude);
        if resolution.resolved_via != ResolvedVia::Primary {
            tracing::warn!(
                timezone = resolution.timezone,
                via = ?resolution.resolved_via,
                "timezone resolved via fallback, not the primary lookup"
            );
        }
        (resolution.timezone, resolution.resolved_via)
    };

    let local_datetime = if settings.use_current_time {
        chrono::Utc::now().naive_utc()
    } else {
        let date = settings
            .date
            .as_deref()
            .ok_or_else(|| HoraryError::input("settings must provide `date`/`time` or `use_current_time`"))?;
        let time = settings.time.as_deref().unwrap_or("12:00");
        parse_local_datetime(date, time)?
    };

    let tz = parse_timezone(&timezone_name)?;
    let utc_datetime = resolve_in_zone(local_datetime, tz).with_timezone(&chrono::Utc);

    Ok(ResolvedMoment {
        local_datetime,
        utc_datetime,
        latitude,
        longitude,
        location_name,
        timezone: timezone_name,
        resolved_via,
    })
}

/// Build the fully-resolved, immutable chart. A single body's
/// ephemeris failure is replaced by a sentinel zero-motion position at
/// longitude 0, logged at `warn`, rather than aborting the whole judgment.
pub fn build_chart(
    moment: &ResolvedMoment,
    collaborators: &Collaborators,
    config: &Configuration,
) -> Result<HoraryChart, HoraryError> {
    let jd = julian_day(moment.utc_datetime);

    let raw_positions = collaborators.ephemeris.positions(jd);
    let house_data = collaborators.ephemeris.houses(jd, moment.latitude, moment.longitude)?;

    let mut positions: HashMap<Planet, PlanetPosition> = HashMap::new();
    for planet in horary_core::ALL_PLANETS {
        let raw = match &raw_positions[&planet] {
            Ok(raw) => *raw,
            Err(err) => {
                tracing::warn!(planet = planet.name(), error = %err, "ephemeris failed for body, using sentinel position");
                crate::collaborators::RawPosition {
                    longitude: 0.0,
                    latitude: 0.0,
                    daily_motion: 0.0,
                }
            }
        };
        let (sign, _) = horary_core::Sign::from_longitude(raw.longitude);
        let house = house_for_longitude(&house_data.cusps, raw.longitude);
        positions.insert(
            planet,
            PlanetPosition {
                planet,
                longitude: raw.longitude,
                latitude: raw.latitude,
                daily_motion: raw.daily_motion,
                sign,
                house,
                dignity_score: 0,
            },
        );
    }

    let house_rulers = crate::houses::house_rulers_from_cusps(&house_data.cusps);
    let solar_conditions = compute_solar_conditions(&positions, config);

    let is_day_chart = matches!(positions[&Planet::Sun].house, 7..=12);
    for planet in horary_core::ALL_PLANETS {
        let score = score_dignity(
            &positions[&planet],
            &house_data.cusps,
            is_day_chart,
            &solar_conditions[&planet],
            config,
        );
        positions.get_mut(&planet).unwrap().dignity_score = score;
    }

    let aspects = compute_aspects(&positions, config);
    let (moon_last_aspect, moon_next_aspect) = moon_story(&positions, config);

    Ok(HoraryChart {
        local_datetime: moment.local_datetime,
        utc_datetime: moment.utc_datetime,
        timezone: moment.timezone.clone(),
        latitude: moment.latitude,
        longitude: moment.longitude,
        location_name: moment.location_name.clone(),
        julian_day: jd,
        ascendant: house_data.ascendant,
        midheaven: house_data.midheaven,
        house_cusps: house_data.cusps,
        house_rulers,
        positions,
        aspects,
        solar_conditions,
        moon_last_aspect,
        moon_next_aspect,
    })
}
