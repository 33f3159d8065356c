use crate::domain::model::LoadSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load strictly one after another.
    pub async fn run(&self) -> Result<LoadSummary> {
        let name = self.pipeline.name();
        tracing::info!("🚀 Starting {} pipeline", name);

        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;

        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data).await?;

        tracing::debug!("Loading data...");
        let summary = self.pipeline.load(transformed).await?;

        tracing::info!(
            "✅ {} pipeline finished: {} records written to {}",
            name,
            summary.records_written,
            summary.destination
        );
        Ok(summary)
    }
}
