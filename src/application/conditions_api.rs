// Upstream conditions server trait
use crate::domain::chart::{ChartKind, ChartSpec};
use crate::domain::conditions::{AllData, LegacyConditions};
use crate::domain::destination::Destination;
use crate::domain::forecast::CardOptions;
use async_trait::async_trait;
use serde::Deserialize;

/// Which endpoint contract the upstream server speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointVariant {
    /// One `/all_data` call returning conditions and serialized charts
    #[default]
    Combined,
    /// `/current_conditions` plus one call per chart
    Legacy,
}

impl EndpointVariant {
    pub fn card_options(self) -> CardOptions {
        match self {
            EndpointVariant::Combined => CardOptions::COMBINED,
            EndpointVariant::Legacy => CardOptions::LEGACY,
        }
    }
}

#[async_trait]
pub trait ConditionsApi: Send + Sync {
    /// `/all_data?destination=..&tz_offset=..`
    async fn fetch_all_data(
        &self,
        destination: &Destination,
        tz_offset_minutes: i32,
    ) -> anyhow::Result<AllData>;

    /// `/current_conditions?destination=..`
    async fn fetch_current_conditions(
        &self,
        destination: &Destination,
    ) -> anyhow::Result<LegacyConditions>;

    /// `/graph`, `/graphtemp` or `/graphhumidity` depending on `kind`
    async fn fetch_chart(
        &self,
        kind: ChartKind,
        destination: &Destination,
    ) -> anyhow::Result<ChartSpec>;
}
