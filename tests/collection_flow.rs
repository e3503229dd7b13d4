//! Integration tests for a full collection run.
//!
//! These tests verify the end-to-end flow against a SQLite project database:
//! 1. A seed file populates alternatives, criteria and definitions
//! 2. A wizard started from the stores walks every step
//! 3. Template export/import fills the matrix like direct entry does
//! 4. The finished run is recorded and can be resumed

use std::sync::Arc;

use tempfile::TempDir;

use mca_intake::adapters::sqlite::{connect, SqliteCriterionCatalog, SqliteEntitySetStore, SqliteRunRepository};
use mca_intake::adapters::{CsvTemplateFile, SeedData};
use mca_intake::application::{
    CollectionSession, RecordRunCommand, RecordRunHandler, ResumeCollectionCommand,
    ResumeCollectionHandler, SeedProjectCommand, SeedProjectHandler, StartCollectionHandler,
};
use mca_intake::config::DatabaseConfig;
use mca_intake::domain::foundation::ErrorCode;
use mca_intake::domain::wizard::WizardStep;
use mca_intake::ports::{EntitySetStore, TemplateFile};

// =============================================================================
// Test Infrastructure
// =============================================================================

const SEED: &str = r#"
alternatives:
  - A
  - B
criteria:
  - name: Cost
    kind: Ratio
    scale: { units: dollars }
    direction: cost
"#;

struct Project {
    alternatives: Arc<SqliteEntitySetStore>,
    criteria: Arc<SqliteEntitySetStore>,
    catalog: Arc<SqliteCriterionCatalog>,
    runs: Arc<SqliteRunRepository>,
}

async fn seeded_project() -> Project {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    let pool = connect(&config).await.unwrap();

    let project = Project {
        alternatives: Arc::new(SqliteEntitySetStore::open(pool.clone(), "alternatives").await.unwrap()),
        criteria: Arc::new(SqliteEntitySetStore::open(pool.clone(), "criteria").await.unwrap()),
        catalog: Arc::new(SqliteCriterionCatalog::open(pool.clone()).await.unwrap()),
        runs: Arc::new(SqliteRunRepository::open(pool).await.unwrap()),
    };

    SeedProjectHandler::new(
        project.alternatives.clone(),
        project.criteria.clone(),
        project.catalog.clone(),
    )
    .handle(SeedProjectCommand {
        seed: SeedData::from_yaml(SEED).unwrap(),
        include_alternatives: true,
        include_criteria: true,
    })
    .await
    .unwrap();

    project
}

async fn session_at_matrix_input(project: &Project) -> CollectionSession {
    let started = StartCollectionHandler::new(
        project.alternatives.clone(),
        project.criteria.clone(),
        project.catalog.clone(),
    )
    .handle()
    .await
    .unwrap();
    assert!(started.skipped_criteria.is_empty());

    let mut session = CollectionSession::new(started.wizard, Arc::new(CsvTemplateFile::new("csv")));
    session.select_alternatives(&[0, 1]).unwrap();
    session.advance().unwrap();
    session.select_criteria(&[0]).unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_step(), WizardStep::MatrixInput);
    session
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn seeded_project_lists_candidates_in_insertion_order() {
    let project = seeded_project().await;
    let names: Vec<String> = project
        .alternatives
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(project.criteria.count().await.unwrap(), 1);
}

#[tokio::test]
async fn template_import_matches_direct_entry() {
    let dir = TempDir::new().unwrap();
    let project = seeded_project().await;
    let templates = CsvTemplateFile::new("csv");

    let mut imported = session_at_matrix_input(&project).await;
    let path = imported.export_template(&dir.path().join("inputs")).await.unwrap();

    let mut rows = templates.read_rows(&path).await.unwrap();
    assert_eq!(rows[0], vec!["", "", "A", "B"]);
    assert_eq!(rows[1], vec!["Cost", "(# dollars)", "", ""]);
    rows[1][2] = "10".to_string();
    rows[1][3] = "20".to_string();
    templates.write_rows(&path, &rows).await.unwrap();

    imported.import_template(&path).await.unwrap();

    let mut direct = session_at_matrix_input(&project).await;
    direct.set_cells(&["10", "20"]).unwrap();

    assert_eq!(imported.wizard().matrix(), direct.wizard().matrix());
}

#[tokio::test]
async fn template_missing_a_row_leaves_matrix_unchanged() {
    let dir = TempDir::new().unwrap();
    let project = seeded_project().await;
    let templates = CsvTemplateFile::new("csv");

    let mut session = session_at_matrix_input(&project).await;
    session.set_cell(0, "7").unwrap();
    let before = session.wizard().matrix().cloned();

    let path = session.export_template(&dir.path().join("inputs")).await.unwrap();
    let mut rows = templates.read_rows(&path).await.unwrap();
    rows.remove(1);
    templates.write_rows(&path, &rows).await.unwrap();

    let err = session.import_template(&path).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StructuralMismatch);
    assert_eq!(session.wizard().matrix().cloned(), before);
}

#[tokio::test]
async fn recorded_run_can_be_resumed_at_weight_input() {
    let project = seeded_project().await;

    let mut session = session_at_matrix_input(&project).await;
    session.set_cells(&["10", "20"]).unwrap();
    session.advance().unwrap();
    session.assign_equal_weight().unwrap();
    assert_eq!(session.advance().unwrap(), WizardStep::Run);
    let input = session.collected_result().unwrap();

    let saved = RecordRunHandler::new(project.runs.clone())
        .handle(RecordRunCommand {
            name: "Baseline".to_string(),
            input: input.clone(),
        })
        .await
        .unwrap();

    let wizard = ResumeCollectionHandler::new(project.runs.clone())
        .handle(ResumeCollectionCommand {
            run_id: saved.id,
            target: WizardStep::WeightInput,
        })
        .await
        .unwrap();

    assert_eq!(wizard.current_step(), WizardStep::WeightInput);
    assert_eq!(wizard.matrix(), Some(input.matrix()));
    assert_eq!(wizard.weights(), Some(input.weights()));
}
