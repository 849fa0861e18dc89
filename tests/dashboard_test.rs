use pessoas_etl::config::toml_config::TomlConfig;
use pessoas_etl::core::Storage;
use pessoas_etl::dashboard::server::routes;
use pessoas_etl::dashboard::{ChartKind, DashboardTable, EnrichOptions};
use pessoas_etl::sheet::read_sheet;
use pessoas_etl::{DocumentPipeline, EtlEngine, ExtractSettings, LocalStorage};
use std::sync::Arc;
use tempfile::TempDir;

async fn extracted_table(document: &str) -> DashboardTable {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("dados.txt"), document).unwrap();

    let mut config = TomlConfig::default();
    config.extract.workdir = temp_dir.path().to_string_lossy().to_string();
    config.extract.input_path = Some("dados.txt".to_string());
    let settings = ExtractSettings::from_toml(&config).unwrap();

    let storage = LocalStorage::new(settings.workdir.clone());
    EtlEngine::new(DocumentPipeline::new(storage.clone(), settings))
        .run()
        .await
        .unwrap();

    let bytes = storage.read_file("dados_pessoas.xlsx").await.unwrap();
    let records = read_sheet(bytes, "Dados").unwrap();
    DashboardTable::build(records, &EnrichOptions::default()).unwrap()
}

#[tokio::test]
async fn test_dashboard_reads_extractor_output() {
    let table = extracted_table(
        "Ana,30,60kg,R$50.000,00\nBruno,41,85kg,R$30.000,00\n",
    )
    .await;

    let rows = table.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].money, "R$50.000,00");
    assert_eq!(rows[0].money_num, 50000.0);
    assert_eq!(rows[1].weight, 85.0);
    assert_eq!(rows[0].mean_money.as_deref(), Some("R$40.000,00"));
    assert_eq!(rows[0].mean_weight.as_deref(), Some("72.5kg"));
    assert_eq!(rows[0].mean_age, Some(35.5));
    assert_eq!(rows[1].mean_money, None);
}

#[tokio::test]
async fn test_pie_over_extracted_rows() {
    let table = extracted_table(
        "Ana,30,60kg,R$50.000,00\nBruno,41,85kg,R$30.000,00\nCarla,25,58kg,R$49.000,00\n",
    )
    .await;

    let json = serde_json::to_value(ChartKind::RemainingPie.build(&table)).unwrap();
    assert_eq!(json["data"][0]["labels"], serde_json::json!(["Bruno", "Carla"]));
    assert_eq!(json["data"][0]["values"], serde_json::json!([20000.0, 1000.0]));
}

#[tokio::test]
async fn test_every_dropdown_option_renders_a_figure() {
    let table = extracted_table("Ana,30,60kg,R$50.000,00\nBruno,41,85kg,R$30.000,00\n").await;
    let filter = routes(Arc::new(table));

    for kind in ChartKind::ALL {
        let response = warp::test::request()
            .path(&format!("/api/figure?chart={}", kind.id()))
            .reply(&filter)
            .await;
        assert_eq!(response.status(), 200);

        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert!(!json["data"].as_array().unwrap().is_empty(), "{}", kind.id());
        assert_eq!(json["layout"]["title"]["x"], 0.5);
    }
}
