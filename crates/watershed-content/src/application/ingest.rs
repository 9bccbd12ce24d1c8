//! Catalog ingestion: parse a content source, validate it, and stamp it
//! with a version hash.

use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};
use watershed_core::error::DomainError;

use crate::domain::catalog::{CatalogDocument, ContentCatalog};
use crate::domain::roles::RoleKey;
use crate::domain::scenario::Act;

/// The catalog shipped with the game.
const BUILTIN_CATALOG: &str = include_str!("../../data/watershed.yaml");

/// Encoding of a content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl SourceFormat {
    /// Picks the format from a file extension (`.yaml`, `.yml`, `.json`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(DomainError::Validation(format!(
                "unsupported content file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Hex SHA-256 of a content source.
#[must_use]
pub fn version_hash(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Parses a content source without validating it.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the source is not a well-formed
/// catalog document.
pub fn parse_document(source: &str, format: SourceFormat) -> Result<CatalogDocument, DomainError> {
    match format {
        SourceFormat::Yaml => serde_yaml::from_str(source)
            .map_err(|e| DomainError::Validation(format!("catalog YAML is malformed: {e}"))),
        SourceFormat::Json => serde_json::from_str(source)
            .map_err(|e| DomainError::Validation(format!("catalog JSON is malformed: {e}"))),
    }
}

/// Checks the structural rules a catalog must satisfy before play.
///
/// All problems are reported together.
///
/// # Errors
///
/// Returns `DomainError::Validation` listing every violation found.
pub fn validate_document(document: &CatalogDocument) -> Result<(), DomainError> {
    let mut problems: Vec<String> = Vec::new();

    let mut role_keys: HashSet<RoleKey> = HashSet::new();
    for profile in &document.roles {
        if !role_keys.insert(profile.key) {
            problems.push(format!("role {} is defined twice", profile.key));
        }
    }
    if role_keys.is_empty() {
        problems.push("catalog defines no roles".to_owned());
    }

    let check_roles = |owner: &str, roles: Option<&[RoleKey]>, problems: &mut Vec<String>| {
        for role in roles.unwrap_or_default() {
            if !role_keys.contains(role) {
                problems.push(format!("{owner} is restricted to undefined role {role}"));
            }
        }
    };

    if document.acts.len() > Act::ALL.len() {
        problems.push(format!(
            "catalog has {} act groups; at most {} are allowed",
            document.acts.len(),
            Act::ALL.len()
        ));
    }

    let mut scenario_ids: HashSet<&str> = HashSet::new();
    for (act_index, scenarios) in document.acts.iter().enumerate() {
        for scenario in scenarios {
            if !scenario_ids.insert(scenario.id.as_str()) {
                problems.push(format!("scenario {} is defined twice", scenario.id));
            }
            if scenario.act.index() != act_index {
                problems.push(format!(
                    "scenario {} declares act {} but is listed under act {act_index}",
                    scenario.id,
                    scenario.act.index()
                ));
            }
            if scenario.options.is_empty() {
                problems.push(format!("scenario {} has no options", scenario.id));
            }
            let mut option_ids: HashSet<&str> = HashSet::new();
            for option in &scenario.options {
                if !option_ids.insert(option.id.as_str()) {
                    problems.push(format!(
                        "option {} appears twice in scenario {}",
                        option.id, scenario.id
                    ));
                }
                if !option.delta.is_finite() {
                    problems.push(format!(
                        "option {}/{} has a non-finite delta",
                        scenario.id, option.id
                    ));
                }
                check_roles(
                    &format!("option {}/{}", scenario.id, option.id),
                    option.roles.as_deref(),
                    &mut problems,
                );
            }
        }
    }

    let mut strategy_ids: HashSet<&str> = HashSet::new();
    for strategy in &document.strategies {
        if !strategy_ids.insert(strategy.id.as_str()) {
            problems.push(format!("strategy {} is defined twice", strategy.id));
        }
        if !strategy.delta.is_finite() {
            problems.push(format!("strategy {} has a non-finite delta", strategy.id));
        }
        check_roles(
            &format!("strategy {}", strategy.id),
            strategy.roles.as_deref(),
            &mut problems,
        );
    }

    for (role, multiplier) in &document.multipliers {
        if !role_keys.contains(role) {
            problems.push(format!("multiplier given for undefined role {role}"));
        }
        if !multiplier.is_finite() {
            problems.push(format!("multiplier for {role} has a non-finite factor"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(problems.join("; ")))
    }
}

/// Parses, validates, and compiles a content source into a catalog.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the source is malformed or breaks a
/// catalog rule.
#[instrument(skip(source), fields(bytes = source.len()))]
pub fn ingest_catalog(source: &str, format: SourceFormat) -> Result<ContentCatalog, DomainError> {
    let document = parse_document(source, format)?;
    validate_document(&document)?;

    let hash = version_hash(source);
    let catalog = ContentCatalog::compile(document, hash);

    info!(
        version_hash = %catalog.version_hash(),
        roles = catalog.roles().len(),
        act_one = catalog.scenario_count(0),
        act_two = catalog.scenario_count(1),
        strategies = catalog.strategies().len(),
        "content catalog ingested"
    );
    Ok(catalog)
}

/// Reads and ingests a catalog file; the format follows the extension.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::Validation` if its content is rejected.
pub fn load_catalog_from_path(path: &Path) -> Result<ContentCatalog, DomainError> {
    let format = SourceFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "reading content catalog");
    let source = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Infrastructure(format!("cannot read {}: {e}", path.display()))
    })?;
    ingest_catalog(&source, format)
}

/// Ingests the catalog shipped with the game.
///
/// # Errors
///
/// Returns `DomainError::Validation` only if the embedded content is broken.
pub fn load_builtin_catalog() -> Result<ContentCatalog, DomainError> {
    ingest_catalog(BUILTIN_CATALOG, SourceFormat::Yaml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::delta::MeterDelta;
    use crate::domain::roles::RoleMultiplier;

    const MINIMAL: &str = r"
roles:
  - key: FARMER
    name: Farmer
    blurb: Grows food.
  - key: TOWN
    name: Town Supervisor
    blurb: Runs the town.
multipliers:
  FARMER: { water: 1.05, equity: 1.10 }
acts:
  - - id: a0
      act: 0
      title: First
      options:
        - id: opt
          label: Do it
          delta: { water: 3 }
strategies:
  - id: s1
    title: Strategy One
    delta: { cost: -2 }
    roles: [TOWN]
";

    fn expect_validation(result: Result<ContentCatalog, DomainError>) -> String {
        match result.unwrap_err() {
            DomainError::Validation(msg) => msg,
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_catalog_loads_with_expected_shape() {
        // Act
        let catalog = load_builtin_catalog().unwrap();

        // Assert
        assert_eq!(catalog.roles().len(), 4);
        assert_eq!(catalog.scenario_count(0), 2);
        assert_eq!(catalog.scenario_count(1), 2);
        assert_eq!(catalog.scenario_count(2), 0);
        assert_eq!(catalog.strategies().len(), 5);
        assert_eq!(catalog.historical_notes().len(), 8);
        assert!(catalog.reflection_prompt().starts_with("Connect your decisions"));
        assert_eq!(
            catalog.multiplier(Some(RoleKey::Farmer)),
            RoleMultiplier::new(1.05, 1.10, 1.0)
        );
    }

    #[test]
    fn test_builtin_turbidity_option_has_partial_delta_filled() {
        let catalog = load_builtin_catalog().unwrap();

        let scenario = catalog.scenario("challenge-turbidity").unwrap();
        let option = scenario.option("turbidity-adaptive-ops").unwrap();

        assert_eq!(option.delta, MeterDelta::new(9.0, 0.0, -4.0));
        assert_eq!(option.roles.as_deref(), Some(&[RoleKey::Nycdep][..]));
    }

    #[test]
    fn test_ingest_minimal_yaml_fills_missing_sections() {
        // Act
        let catalog = ingest_catalog(MINIMAL, SourceFormat::Yaml).unwrap();

        // Assert
        assert_eq!(catalog.scenario_count(0), 1);
        assert_eq!(catalog.scenario_count(1), 0);
        assert!(catalog.historical_notes().is_empty());
        assert_eq!(catalog.role(RoleKey::Farmer).unwrap().tagline, "");
        assert_eq!(
            catalog.multiplier(Some(RoleKey::Farmer)),
            RoleMultiplier::new(1.05, 1.10, 1.0)
        );
        assert_eq!(
            catalog.multiplier(Some(RoleKey::Town)),
            RoleMultiplier::IDENTITY
        );
        assert_eq!(catalog.multiplier(None), RoleMultiplier::IDENTITY);
    }

    #[test]
    fn test_ingest_json_source() {
        // Arrange
        let json = r#"{
            "roles": [{ "key": "NGO", "name": "NGO", "blurb": "Advocates." }],
            "multipliers": { "NGO": { "water": 1.1 } },
            "acts": [[], [{
                "id": "c1", "act": 1, "title": "Challenge",
                "options": [{ "id": "o1", "label": "Act", "delta": { "equity": 2 } }]
            }]],
            "strategies": []
        }"#;

        // Act
        let catalog = ingest_catalog(json, SourceFormat::Json).unwrap();

        // Assert
        assert_eq!(catalog.scenario_count(0), 0);
        assert_eq!(catalog.scenario_at(1, 0).unwrap().id, "c1");
        assert_eq!(
            catalog.multiplier(Some(RoleKey::Ngo)),
            RoleMultiplier::new(1.1, 1.0, 1.0)
        );
    }

    #[test]
    fn test_version_hash_is_stable_and_content_sensitive() {
        let a = ingest_catalog(MINIMAL, SourceFormat::Yaml).unwrap();
        let b = ingest_catalog(MINIMAL, SourceFormat::Yaml).unwrap();
        let changed = MINIMAL.replace("Grows food.", "Grows more food.");
        let c = ingest_catalog(&changed, SourceFormat::Yaml).unwrap();

        assert_eq!(a.version_hash(), b.version_hash());
        assert_ne!(a.version_hash(), c.version_hash());
        assert_eq!(a.version_hash().len(), 64);
    }

    #[test]
    fn test_rejects_scenario_listed_under_wrong_act() {
        let source = MINIMAL.replace("act: 0", "act: 1");

        let msg = expect_validation(ingest_catalog(&source, SourceFormat::Yaml));

        assert!(msg.contains("declares act 1 but is listed under act 0"), "{msg}");
    }

    #[test]
    fn test_rejects_duplicate_option_and_unknown_role_together() {
        // Arrange
        let source = MINIMAL.replace(
            "          delta: { water: 3 }\n",
            "          delta: { water: 3 }\n        - id: opt\n          label: Again\n          roles: [NGO]\n",
        );

        // Act
        let msg = expect_validation(ingest_catalog(&source, SourceFormat::Yaml));

        // Assert
        assert!(msg.contains("option opt appears twice in scenario a0"), "{msg}");
        assert!(msg.contains("restricted to undefined role NGO"), "{msg}");
    }

    #[test]
    fn test_rejects_scenario_without_options() {
        let source = r"
roles:
  - { key: TOWN, name: Town, blurb: Town. }
acts:
  - - { id: empty, act: 0, title: Empty, options: [] }
";
        let msg = expect_validation(ingest_catalog(source, SourceFormat::Yaml));
        assert!(msg.contains("scenario empty has no options"), "{msg}");
    }

    #[test]
    fn test_rejects_non_finite_option_delta() {
        // Arrange
        let source = MINIMAL.replace("delta: { water: 3 }", "delta: { water: 3, cost: .nan }");

        // Act
        let msg = expect_validation(ingest_catalog(&source, SourceFormat::Yaml));

        // Assert
        assert!(msg.contains("option a0/opt has a non-finite delta"), "{msg}");
    }

    #[test]
    fn test_rejects_non_finite_strategy_delta() {
        // Arrange
        let source = MINIMAL.replace("delta: { cost: -2 }", "delta: { cost: -.inf }");

        // Act
        let msg = expect_validation(ingest_catalog(&source, SourceFormat::Yaml));

        // Assert
        assert!(msg.contains("strategy s1 has a non-finite delta"), "{msg}");
    }

    #[test]
    fn test_rejects_non_finite_multiplier() {
        // Arrange
        let source = MINIMAL.replace(
            "FARMER: { water: 1.05, equity: 1.10 }",
            "FARMER: { water: .nan, equity: .inf }",
        );

        // Act
        let msg = expect_validation(ingest_catalog(&source, SourceFormat::Yaml));

        // Assert
        assert!(msg.contains("multiplier for FARMER has a non-finite factor"), "{msg}");
    }

    #[test]
    fn test_rejects_more_than_two_act_groups() {
        let source = r"
roles:
  - { key: TOWN, name: Town, blurb: Town. }
acts: [[], [], []]
";
        let msg = expect_validation(ingest_catalog(source, SourceFormat::Yaml));
        assert!(msg.contains("at most 2"), "{msg}");
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        let msg = expect_validation(ingest_catalog("roles: [", SourceFormat::Yaml));
        assert!(msg.contains("malformed"), "{msg}");
    }

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("content/catalog.YML")).unwrap(),
            SourceFormat::Yaml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("catalog.json")).unwrap(),
            SourceFormat::Json
        );
        assert!(SourceFormat::from_path(Path::new("catalog.toml")).is_err());
    }

    #[test]
    fn test_load_catalog_from_missing_path_is_infrastructure_error() {
        let result = load_catalog_from_path(Path::new("/nonexistent/watershed.yaml"));
        match result.unwrap_err() {
            DomainError::Infrastructure(msg) => assert!(msg.contains("cannot read")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
