use super::*;
use crate::test_fixtures::catalog;
use orna_codex_catalog::{CompositeKey, RawItem};

fn keys(result: &FilterResult<'_>) -> Vec<String> {
    result.rows.iter().map(|i| i.key.to_string()).collect()
}

fn tagged(id: &str, tags: &[&str]) -> CatalogItem {
    CatalogItem {
        key: CompositeKey::new("items", id),
        name: id.to_string(),
        search_text: id.to_string(),
        fields: RawItem {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..RawItem::default()
        },
    }
}

#[test]
fn empty_state_returns_everything_in_order() {
    let catalog = catalog("en");
    let result = evaluate(catalog.items(), &FilterState::new());
    assert_eq!(result.total_count, catalog.len());
    assert_eq!(result.rows, catalog.items().iter().collect::<Vec<_>>());
}

#[test]
fn query_matches_substring_in_any_language() {
    let catalog = catalog("zh-hans");
    let result = evaluate(catalog.items(), &FilterState::new().with_query("  DRAG "));
    assert_eq!(
        keys(&result),
        vec!["bosses:dragon", "items:dragon-scale", "items:dragon-sword"]
    );
    // display language is Chinese, but the English name still matched
    assert_eq!(result.rows[2].name, "龙剑");

    let result = evaluate(catalog.items(), &FilterState::new().with_query("龙剑"));
    assert_eq!(keys(&result), vec!["items:dragon-sword"]);
}

#[test]
fn whitespace_query_is_inactive() {
    let catalog = catalog("en");
    let state = FilterState::new().with_query("   ");
    assert!(state.is_empty());
    assert_eq!(evaluate(catalog.items(), &state).total_count, catalog.len());
}

#[test]
fn scalar_clause_is_exact_equality() {
    let catalog = catalog("en");
    let state = FilterState::new().with_clause(FilterClause::new("tier", "2"));
    assert_eq!(
        keys(&evaluate(catalog.items(), &state)),
        vec!["monsters:goblin", "spells:venom"]
    );

    let state = FilterState::new().with_clause(FilterClause::new("category", "spells"));
    assert_eq!(evaluate(catalog.items(), &state).total_count, 3);
}

#[test]
fn status_clause_checks_the_selected_relation() {
    let catalog = catalog("en");
    let causes = FilterState::new().with_clause(FilterClause::new("cause", "Poison"));
    assert_eq!(
        keys(&evaluate(catalog.items(), &causes)),
        vec!["items:dragon-sword", "spells:toxic-cloud", "spells:venom"]
    );

    let cures = FilterState::new().with_clause(FilterClause::new("cure", "Poison"));
    assert_eq!(keys(&evaluate(catalog.items(), &cures)), vec!["items:potion"]);

    let immune = FilterState::new().with_clause(FilterClause::new("immunity", "Blind"));
    assert_eq!(keys(&evaluate(catalog.items(), &immune)), vec!["monsters:goblin"]);
}

#[test]
fn same_kind_clauses_combine_with_and() {
    let items = vec![tagged("a", &["x"]), tagged("b", &["x", "y"])];
    let state = FilterState::new()
        .with_clause(FilterClause::new("tag", "x"))
        .with_clause(FilterClause::new("tag", "y"));
    let result = evaluate(&items, &state);
    assert_eq!(keys(&result), vec!["items:b"]);
}

#[test]
fn adding_a_clause_never_grows_the_result() {
    let catalog = catalog("en");
    let steps = [
        FilterClause::new("category", "items"),
        FilterClause::new("tag", "Weapon"),
        FilterClause::new("cause", "Poison"),
        FilterClause::new("rarity", "Common"),
    ];
    let mut state = FilterState::new().with_query("d");
    let mut previous = evaluate(catalog.items(), &state).total_count;
    for clause in steps {
        state = state.with_clause(clause);
        let count = evaluate(catalog.items(), &state).total_count;
        assert!(count <= previous, "{:?} grew result", state);
        previous = count;
    }
    assert_eq!(previous, 0);
}

#[test]
fn unknown_clause_is_ignored() {
    let catalog = catalog("en");
    let state = FilterState::new()
        .with_clause(FilterClause::new("colour", "red"))
        .with_clause(FilterClause::new("tag", "Weapon"));
    assert_eq!(
        keys(&evaluate(catalog.items(), &state)),
        vec!["items:dragon-sword"]
    );
}

#[test]
fn unset_clause_imposes_no_constraint() {
    let catalog = catalog("en");
    let state = FilterState::new()
        .with_clause(FilterClause::unset("tag"))
        .with_clause(FilterClause::new("family", ""));
    assert_eq!(state.active_count(), 0);
    assert_eq!(evaluate(catalog.items(), &state).total_count, catalog.len());
}

#[test]
fn clause_kind_accepts_aliases() {
    assert_eq!("tags".parse::<ClauseKind>().unwrap(), ClauseKind::Tag);
    assert_eq!("Causes".parse::<ClauseKind>().unwrap(), ClauseKind::Cause);
    assert_eq!("useableBy".parse::<ClauseKind>().unwrap(), ClauseKind::Useable);
    assert!(matches!(
        "statuses".parse::<ClauseKind>(),
        Err(CodexError::UnknownFilterClauseType(_))
    ));
}

#[test]
fn clause_parses_from_command_line_form() {
    let clause: FilterClause = "cause=Poison".parse().unwrap();
    assert_eq!(clause, FilterClause::new("cause", "Poison"));
    assert!("cause".parse::<FilterClause>().is_err());
    assert!("colour=red".parse::<FilterClause>().is_err());
}

#[test]
fn filter_state_round_trips_through_json() {
    let state = FilterState::new()
        .with_query("Drag")
        .with_clause(FilterClause::new("tag", "Weapon"))
        .with_clause(FilterClause::unset("cause"));
    let json = serde_json::to_string(&state).unwrap();
    let back: FilterState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.query, "drag");
}
