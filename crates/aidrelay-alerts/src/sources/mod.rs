//! Source adapters.
//!
//! Each adapter wraps one external data source and exposes a `fetch` that
//! never fails: request and parse errors are logged as warnings and degrade
//! to an empty list, so the aggregator needs no error handling at the call
//! site.

pub(crate) mod bulletins;
pub(crate) mod feed;
pub(crate) mod seismic;
pub(crate) mod weather;

pub(crate) use bulletins::BulletinSource;
pub(crate) use feed::FeedSource;
pub(crate) use seismic::SeismicSource;
pub(crate) use weather::WeatherSource;
