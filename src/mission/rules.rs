//! Scenario-tunable per-mission rules
//!
//! Loaded from TOML tables keyed by mission name. A mission without a table
//! keeps its constructed defaults.

use ahash::AHashMap;

use crate::core::constants::TICKS_PER_MINUTE;
use crate::mission::kind::MissionKind;

/// Tunables for one mission kind
#[derive(Debug, Clone, PartialEq)]
pub struct MissionRules {
    /// Objects on this mission ignore incoming threats
    pub no_threat: bool,
    /// Objects on this mission never respond at all
    pub zombie: bool,
    /// Teams may recruit objects that are on this mission
    pub recruitable: bool,
    /// Objects cannot move on this mission
    pub paralyzed: bool,
    /// Objects fire back when attacked
    pub retaliate: bool,
    /// Objects scatter from threats
    pub scatter: bool,
    /// Minutes between handler runs
    pub rate: f32,
    /// Minutes between handler runs for aircraft (0 means use `rate`)
    pub aa_rate: f32,
}

impl Default for MissionRules {
    fn default() -> Self {
        Self {
            no_threat: false,
            zombie: false,
            recruitable: true,
            paralyzed: false,
            retaliate: true,
            scatter: true,
            rate: 0.016,
            aa_rate: 0.0,
        }
    }
}

impl MissionRules {
    /// Ticks between handler runs
    pub fn normal_delay(&self) -> u32 {
        (self.rate * TICKS_PER_MINUTE as f32).round() as u32
    }

    /// Ticks between handler runs for aircraft
    pub fn aa_delay(&self) -> u32 {
        if self.aa_rate == 0.0 {
            self.normal_delay()
        } else {
            (self.aa_rate * TICKS_PER_MINUTE as f32).round() as u32
        }
    }

    /// Overlay any keys present in the table onto these rules
    fn apply_table(&mut self, table: &toml::value::Table) {
        let flag = |key: &str, current: bool| {
            table.get(key).and_then(|v| v.as_bool()).unwrap_or(current)
        };
        let rate = |key: &str, current: f32| {
            table
                .get(key)
                .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
                .map(|f| f as f32)
                .unwrap_or(current)
        };

        self.no_threat = flag("NoThreat", self.no_threat);
        self.zombie = flag("Zombie", self.zombie);
        self.recruitable = flag("Recruitable", self.recruitable);
        self.paralyzed = flag("Paralyzed", self.paralyzed);
        self.retaliate = flag("Retaliate", self.retaliate);
        self.scatter = flag("Scatter", self.scatter);
        self.rate = rate("Rate", self.rate);
        self.aa_rate = rate("AARate", self.aa_rate);
    }
}

/// Rules for every mission kind
#[derive(Debug, Clone, Default)]
pub struct MissionRuleSet {
    rules: AHashMap<MissionKind, MissionRules>,
    defaults: MissionRules,
}

impl MissionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: MissionKind) -> &MissionRules {
        self.rules.get(&kind).unwrap_or(&self.defaults)
    }

    pub fn set(&mut self, kind: MissionKind, rules: MissionRules) {
        self.rules.insert(kind, rules);
    }

    /// `None` is always recruitable
    pub fn is_recruitable(&self, kind: MissionKind) -> bool {
        kind.is_none() || self.get(kind).recruitable
    }

    /// Read every mission section present in the document
    ///
    /// Returns the number of sections applied.
    pub fn read_ini(&mut self, doc: &toml::Value) -> usize {
        let mut applied = 0;
        for kind in MissionKind::all() {
            if let Some(table) = doc.get(kind.name()).and_then(|v| v.as_table()) {
                let mut rules = self.get(kind).clone();
                rules.apply_table(table);
                self.rules.insert(kind, rules);
                applied += 1;
            }
        }
        tracing::debug!("Applied {} mission rule sections", applied);
        applied
    }

    /// Parse a TOML document and read its mission sections
    pub fn read_ini_str(&mut self, content: &str) -> Result<usize, toml::de::Error> {
        let doc: toml::Value = content.parse()?;
        Ok(self.read_ini(&doc))
    }
}
