//! Built-in tree topologies per character archetype.
//!
//! ```text
//! skirmisher(margin, dodge_ticks)
//!   └─ Selector
//!       ├─ Sequence [Incapacitated, Idle]            ← forced no-op
//!       ├─ Sequence [InHostileZone, ExitZone]
//!       ├─ Sequence [ThreatImminent, Selector [Dodging, Sequence [HasDodgeCharge, Chance]], Dodge]
//!       ├─ Attack
//!       └─ Reposition                                ← never fails
//! ```

use serde::{Deserialize, Serialize};

use super::definition::{CheckerSpec, TaskSpec, TreeDefinition};

/// Named archetypes with a built-in tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Exit zones, dodge threats, otherwise attack, otherwise reposition.
    Skirmisher,
    /// Attacks from where it stands and never dodges.
    Bruiser,
    /// Never acts. Useful as a target.
    Dummy,
}

/// Tunables shared by the built-in trees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeParams {
    /// Seconds of warning that count as an imminent zone.
    pub threat_margin: f32,
    pub dodge_ticks: u32,
}

impl Archetype {
    pub fn definition(self, params: ArchetypeParams) -> TreeDefinition {
        use TreeDefinition::{Check, Selector, Sequence, Task};

        let incapacitated = Sequence(vec![
            Check(CheckerSpec::Incapacitated),
            Task(TaskSpec::Idle),
        ]);

        match self {
            Archetype::Skirmisher => Selector(vec![
                incapacitated,
                Sequence(vec![
                    Check(CheckerSpec::InHostileZone),
                    Task(TaskSpec::ExitZone),
                ]),
                Sequence(vec![
                    Check(CheckerSpec::ThreatImminent {
                        margin: params.threat_margin,
                    }),
                    // A running dodge re-enters without paying again.
                    Selector(vec![
                        Check(CheckerSpec::Dodging),
                        Sequence(vec![
                            Check(CheckerSpec::HasDodgeCharge),
                            Check(CheckerSpec::Chance),
                        ]),
                    ]),
                    Task(TaskSpec::Dodge {
                        duration_ticks: params.dodge_ticks,
                    }),
                ]),
                Task(TaskSpec::Attack),
                Task(TaskSpec::Reposition),
            ]),
            Archetype::Bruiser => Selector(vec![
                incapacitated,
                Task(TaskSpec::Attack),
                Task(TaskSpec::Reposition),
            ]),
            Archetype::Dummy => Task(TaskSpec::Idle),
        }
    }
}
