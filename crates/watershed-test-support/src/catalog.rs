//! A small catalog with known numbers for session and API tests.

use watershed_content::ContentCatalog;
use watershed_content::application::ingest::{SourceFormat, ingest_catalog};

/// Fixture content: two scenarios in Act I, three in Act II, six strategies.
pub const FIXTURE_CATALOG_YAML: &str = r"
roles:
  - key: NYCDEP
    name: City Water Official
    blurb: Keeps the supply safe.
    tagline: Water first.
  - key: TOWN
    name: Town Supervisor
    blurb: Keeps the town going.
    tagline: Place and people.
  - key: FARMER
    name: Farmer
    blurb: Keeps the farm viable.
    tagline: Soil and solvency.
  - key: NGO
    name: Watershed Advocate
    blurb: Keeps everyone honest.
    tagline: Ecosystems.

multipliers:
  NYCDEP: { water: 1.15, equity: 1.0, cost: 0.95 }
  FARMER: { water: 1.05, equity: 1.10, cost: 1.0 }

acts:
  - - id: fx-easements
      act: 0
      title: Easements
      prompt: How do you expand protection?
      options:
        - id: fx-broad
          label: Broad voluntary easements
          delta: { water: 8, equity: 6, cost: -5 }
          roles: [NYCDEP, NGO, TOWN]
        - id: fx-targeted
          label: Target priority parcels
          delta: { water: 6, equity: -2, cost: 3 }
        - id: fx-farm-pilots
          label: Farm-friendly pilots
          delta: { water: 6, equity: 5, cost: -3 }
          roles: [FARMER, TOWN]
    - id: fx-governance
      act: 0
      title: Governance
      options:
        - id: fx-youth-seats
          label: Add advisory seats
          delta: { water: 2, equity: 8, cost: -2 }
        - id: fx-streamline
          label: Streamline grants
          delta: { water: 5, cost: -1 }
  - - id: fx-turbidity
      act: 1
      title: Turbidity
      options:
        - id: fx-adaptive-ops
          label: Adaptive operations
          delta: { water: 9, cost: -4 }
        - id: fx-filtration
          label: Build filtration
          delta: { water: 12, equity: -3, cost: -15 }
          roles: [NYCDEP]
    - id: fx-growth
      act: 1
      title: Growth
      options:
        - id: fx-cluster
          label: Cluster development
          delta: { water: 3, equity: 4, cost: -2 }
    - id: fx-flooding
      act: 1
      title: Flooding
      options:
        - id: fx-buyouts
          label: Floodplain buyouts
          delta: { water: 4, equity: -4, cost: -6 }
        - id: fx-levees
          label: Raise levees
          delta: { water: -2, equity: 2, cost: -8 }

strategies:
  - id: fx-retrofits
    title: Green Infrastructure Retrofits
    summary: Retrofits everywhere.
    delta: { water: 7, equity: 2, cost: -3 }
  - id: fx-incentives
    title: BMP Incentives
    summary: Pay for practices.
    delta: { water: 6, equity: 3, cost: -2 }
    roles: [FARMER, TOWN]
  - id: fx-co-management
    title: Co-Management
    summary: Share the decisions.
    delta: { water: 3, equity: 7, cost: -1 }
    roles: [NYCDEP, TOWN]
  - id: fx-permitting
    title: Smart Permitting
    summary: Faster, tighter permits.
    delta: { water: 5, cost: -2 }
    roles: [NYCDEP, NGO]
  - id: fx-rate-design
    title: Rate Design
    summary: Fairer bills.
    delta: { equity: 6, cost: -2 }
    roles: [NYCDEP, TOWN]
  - id: fx-monitoring
    title: Community Monitoring
    summary: Volunteers sample streams.
    delta: { water: 4, equity: 1, cost: -1 }

historical_notes:
  - The first note.
  - The second note.

reflection_prompt: What would you do differently?
";

/// Parses [`FIXTURE_CATALOG_YAML`].
///
/// # Panics
///
/// Panics if the fixture no longer passes catalog validation.
#[must_use]
pub fn fixture_catalog() -> ContentCatalog {
    ingest_catalog(FIXTURE_CATALOG_YAML, SourceFormat::Yaml).expect("fixture catalog is valid")
}
