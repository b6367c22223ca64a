pub mod bootstrap;
pub mod cycle;
pub mod directory;
pub mod dispatch;
pub mod notify;
pub mod refresh;
pub mod schema;
pub mod scrapers;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_support;
