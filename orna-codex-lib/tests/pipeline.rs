use std::fs;
use std::sync::Arc;

use orna_codex_catalog::{CompositeKey, Relation, load_datasets_async};
use orna_codex_lib::{
    Action, AppState, ClauseKind, Facet, FilterClause, FilterState, RowWindow, UserSettings,
    build_facet_options, evaluate, normalize, resolve_detail,
};
use tempfile::TempDir;

const EN: &str = r#"
{
  "text": { "causes": "Causes" },
  "category": { "monsters": "Monsters", "spells": "Spells" },
  "codex": {
    "monsters": {
      "wolf": { "name": "Wolf", "tier": 1, "spells": ["bite"] },
      "dire-wolf": { "name": "Dire Wolf", "tier": 3, "spells": ["bite", "howl"] }
    },
    "spells": {
      "bite": { "name": "Bite", "tier": 1, "causes": [["Bleeding", 10]] },
      "howl": { "name": "Howl", "tier": 3, "causes": [["Fear", 40], ["Bleeding", 10]] }
    }
  }
}
"#;

const ZH: &str = r#"
{
  "category": { "monsters": "怪物" },
  "codex": {
    "monsters": {
      "wolf": { "name": "狼", "tier": 1, "spells": ["bite"] },
      "dire-wolf": { "name": "恐狼", "tier": 3, "spells": ["bite", "howl"] }
    },
    "spells": {
      "bite": { "name": "撕咬", "causes": [["流血", 10]] },
      "howl": { "name": "嚎叫", "causes": [["恐惧", 40], ["流血", 10]] }
    }
  }
}
"#;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), EN).unwrap();
    fs::write(dir.path().join("zh-hans.json"), ZH).unwrap();
    dir
}

#[tokio::test]
async fn load_normalize_filter_and_resolve() {
    let dir = data_dir();
    let datasets = load_datasets_async(dir.path(), "zh-hans", &["en".to_string()])
        .await
        .unwrap();

    let catalog = normalize(&datasets, "zh-hans").unwrap();
    assert_eq!(catalog.len(), 4);

    // English query against a Chinese display
    let state = FilterState::new().with_query("wolf");
    let result = evaluate(catalog.items(), &state);
    let names: Vec<&str> = result.rows.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["恐狼", "狼"]);

    let options = build_facet_options(&catalog);
    let statuses: Vec<&str> = options.get(Facet::Statuses).unwrap().values().collect();
    assert_eq!(statuses, vec!["恐惧", "流血"]);
    assert!(
        options
            .for_clause(ClauseKind::Cause)
            .unwrap()
            .contains("流血")
    );

    let key: CompositeKey = "monsters/dire-wolf".parse().unwrap();
    let dire_wolf = catalog.get(&key).unwrap();
    let view = resolve_detail(dire_wolf, &catalog);
    assert_eq!(view.relation(Relation::Spells).len(), 2);
    assert_eq!(view.unresolved().count(), 0);
    let bleeding = &view.causes_by_spells[0];
    assert_eq!(bleeding.status, "流血");
    assert_eq!(bleeding.probability, Some(10));
    assert_eq!(bleeding.by, vec!["撕咬 (10%)", "嚎叫 (10%)"]);
}

#[tokio::test]
async fn store_drives_the_same_pipeline() {
    let dir = data_dir();
    let settings = UserSettings {
        language: "en".into(),
        secondary_languages: vec!["zh-hans".into()],
        data_dir: Some(dir.path().to_path_buf()),
    };
    let state = AppState::new(&settings);
    let datasets = load_datasets_async(dir.path(), &state.language, &state.secondary_languages)
        .await
        .unwrap();

    let state = state
        .apply(Action::Initialized(Arc::new(datasets)))
        .apply(Action::SearchUpdated("狼".into()))
        .apply(Action::FilterInserted(FilterClause::new("tier", "3")));
    let names: Vec<&str> = state.rows().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Dire Wolf"]);

    let window = RowWindow::list();
    assert_eq!(window.label(state.total_count()), "1 / 1");
}
