use crate::core::parser::parse_document;
use crate::core::pdf::{is_pdf_path, pdf_text};
use crate::core::summary::summarize;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::sheet::{layout_sheet, workbook_bytes};
use crate::utils::error::{EtlError, Result};
use std::path::Path;

/// Document -> records -> summary -> styled spreadsheet.
pub struct DocumentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> DocumentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DocumentPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading document: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let text = if is_pdf_path(self.config.input_path()) {
            pdf_text(&bytes)?
        } else {
            String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
                message: format!("document is not valid UTF-8: {}", e),
            })?
        };

        parse_document(&text)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let summary = summarize(&data)?;
        Ok(TransformResult {
            records: data,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        // 先完成整份版面與檔案內容，失敗時不會留下半成品
        let layout = layout_sheet(
            &result,
            self.config.sheet_name(),
            self.config.highlight_threshold(),
        )?;
        let xlsx = workbook_bytes(&layout)?;

        tracing::debug!("Writing spreadsheet ({} bytes) to storage", xlsx.len());
        self.storage
            .write_file(self.config.output_path(), &xlsx)
            .await?;

        Ok(Path::new(self.config.output_path()).display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::EtlEngine;
    use crate::domain::model::DEFAULT_MONEY_THRESHOLD;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_document(path: &str, text: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), text.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        fn with_bytes(path: &str, data: Vec<u8>) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data);
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input: &'static str,
    }

    const TEXT_INPUT: MockConfig = MockConfig { input: "dados.txt" };

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            self.input
        }

        fn output_path(&self) -> &str {
            "dados_pessoas.xlsx"
        }

        fn sheet_name(&self) -> &str {
            "Dados"
        }

        fn highlight_threshold(&self) -> f64 {
            DEFAULT_MONEY_THRESHOLD
        }
    }

    #[tokio::test]
    async fn test_pipeline_writes_spreadsheet() {
        let storage = MockStorage::with_document(
            "dados.txt",
            "Ana,30,60kg,R$50.000,00\nBruno,41,85kg,R$30.000,00\n",
        );
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), TEXT_INPUT));

        let output = engine.run().await.unwrap();
        assert_eq!(output, "dados_pessoas.xlsx");

        let xlsx = storage.get_file("dados_pessoas.xlsx").await.unwrap();
        assert!(xlsx.starts_with(b"PK"), "xlsx is a zip container");
    }

    #[tokio::test]
    async fn test_invalid_age_leaves_no_output() {
        let storage = MockStorage::with_document(
            "dados.txt",
            "Ana,30,60kg,R$50.000,00\nBruno,quarenta,85kg,R$30.000,00\n",
        );
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), TEXT_INPUT));

        assert!(matches!(
            engine.run().await,
            Err(EtlError::InvalidAge { line: 2, .. })
        ));
        assert!(storage.get_file("dados_pessoas.xlsx").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_document_leaves_no_output() {
        let storage = MockStorage::with_document("dados.txt", "cabeçalho sem dados\n");
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), TEXT_INPUT));

        assert!(matches!(engine.run().await, Err(EtlError::EmptyDataset)));
        assert!(storage.get_file("dados_pessoas.xlsx").await.is_none());
    }

    #[tokio::test]
    async fn test_dry_run_summarizes_without_writing() {
        let storage = MockStorage::with_document("dados.txt", "Ana,30,60kg,R$50.000,00\n");
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), TEXT_INPUT));

        let result = engine.dry_run().await.unwrap();
        assert_eq!(result.summary.mean_money, "R$50.000,00");
        assert!(storage.get_file("dados_pessoas.xlsx").await.is_none());
    }

    #[tokio::test]
    async fn test_pdf_document_pages_are_parsed_in_order() {
        let pdf = crate::core::pdf::sample_pdf(&[
            &["Ana,30,60kg,R$50.000,00"],
            &["Bruno,41,85kg,R$30.000,00"],
        ]);
        let storage = MockStorage::with_bytes("Dados.PDF", pdf);
        let config = MockConfig { input: "Dados.PDF" };
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), config));

        let result = engine.dry_run().await.unwrap();
        let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
        assert_eq!(result.summary.mean_money, "R$40.000,00");
    }

    #[tokio::test]
    async fn test_text_under_pdf_name_is_a_pdf_error() {
        let storage = MockStorage::with_document("dados.pdf", "Ana,30,60kg,R$50.000,00\n");
        let config = MockConfig { input: "dados.pdf" };
        let engine = EtlEngine::new(DocumentPipeline::new(storage.clone(), config));

        assert!(matches!(engine.run().await, Err(EtlError::PdfError(_))));
        assert!(storage.get_file("dados_pessoas.xlsx").await.is_none());
    }
}
