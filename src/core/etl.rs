use crate::core::Pipeline;
use crate::domain::normalize::NORMALIZATION_VERSION;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process (text format v{})...", NORMALIZATION_VERSION);

        let records = self.pipeline.extract().await?;
        tracing::info!("📄 Extracted {} records", records.len());

        let transformed = self.pipeline.transform(records).await?;
        tracing::info!(
            "🧮 Summary: mean age {}, mean weight {}, mean money {}",
            transformed.summary.mean_age,
            transformed.summary.mean_weight,
            transformed.summary.mean_money
        );

        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// Extract and transform only; nothing is written.
    pub async fn dry_run(&self) -> Result<crate::core::TransformResult> {
        let records = self.pipeline.extract().await?;
        tracing::info!("🔍 DRY RUN - extracted {} records", records.len());
        self.pipeline.transform(records).await
    }
}
