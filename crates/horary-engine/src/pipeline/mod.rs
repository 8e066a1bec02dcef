//! The judgment pipeline: one module per stage of the analysis, composed by
//! [`judgment::compose_judgment`] in declared order ("rule
//! ordering is the design").

pub mod aspects;
pub mod denial;
pub mod dignity;
pub mod judgment;
pub mod moon;
pub mod perfection;
pub mod question;
pub mod radicality;
pub mod reception;
pub mod significator;
pub mod solar;
