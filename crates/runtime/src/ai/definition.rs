//! Data-defined tree topology.
//!
//! A [`TreeDefinition`] is the serializable shape of a combat tree, loaded
//! once per archetype (typically from RON). [`TreeDefinition::build`]
//! validates it and produces live nodes; [`spawn_tree`] never fails and
//! substitutes [`fallback_tree`] for invalid definitions.
//!
//! ```ron
//! Selector([
//!     Sequence([Check(InHostileZone), Task(ExitZone)]),
//!     Sequence([Check(ThreatImminent(margin: 0.5)), Task(Dodge(duration_ticks: 3))]),
//!     Task(Attack),
//!     Task(Reposition),
//! ])
//! ```

use behavior_tree::{BehaviorTree, DecisionNode, builder};
use combat_core::{StatusEffectKind, report};
use serde::{Deserialize, Serialize};

use super::error::TreeError;
use super::nodes::{
    ApplySelfState, Attack, Dodge, ExitZone, HasDodgeCharge, HasState, Idle, IsCasting,
    IsDodging, IsInHostileZone, IsIncapacitated, IsInProjectilePath, IsLifeBelow,
    IsThreatImminent, Reposition,
};
use super::AiContext;

/// Checker leaf by name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CheckerSpec {
    InHostileZone,
    ThreatImminent { margin: f32 },
    InProjectilePath,
    Casting,
    HasState(StatusEffectKind),
    Incapacitated,
    LifeBelow { ratio: f32 },
    HasDodgeCharge,
    /// A dodge is still running from the previous tick.
    Dodging,
    /// Probabilistic gate using the tree's randomness threshold.
    Chance,
}

/// Task leaf by name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TaskSpec {
    ExitZone,
    Dodge { duration_ticks: u32 },
    Attack,
    Reposition,
    Idle,
    ApplySelfState(StatusEffectKind),
}

impl TaskSpec {
    /// Tasks that succeed regardless of context.
    pub fn is_unconditional(self) -> bool {
        matches!(
            self,
            TaskSpec::Reposition | TaskSpec::Idle | TaskSpec::ApplySelfState(_)
        )
    }
}

/// Serializable tree topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TreeDefinition {
    Selector(Vec<TreeDefinition>),
    Sequence(Vec<TreeDefinition>),
    Check(CheckerSpec),
    Task(TaskSpec),
}

impl TreeDefinition {
    /// Validates the topology and builds live nodes.
    ///
    /// The root must be unable to fail: either an unconditional task, or a
    /// selector whose last child is one.
    pub fn build(&self) -> Result<DecisionNode<AiContext>, TreeError> {
        self.validate()?;
        Ok(self.build_node())
    }

    /// Checks the topology without building it.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.validate_at("root")?;
        if self.has_fallback() {
            Ok(())
        } else {
            Err(TreeError::MissingFallback)
        }
    }

    fn has_fallback(&self) -> bool {
        match self {
            TreeDefinition::Task(task) => task.is_unconditional(),
            TreeDefinition::Selector(children) => matches!(
                children.last(),
                Some(TreeDefinition::Task(task)) if task.is_unconditional()
            ),
            _ => false,
        }
    }

    fn validate_at(&self, path: &str) -> Result<(), TreeError> {
        match self {
            TreeDefinition::Selector(children) | TreeDefinition::Sequence(children) => {
                let kind = if matches!(self, TreeDefinition::Selector(_)) {
                    "selector"
                } else {
                    "sequence"
                };
                if children.is_empty() {
                    return Err(TreeError::EmptyComposite {
                        kind,
                        path: path.to_string(),
                    });
                }
                children
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, child)| child.validate_at(&format!("{path}/{kind}[{i}]")))
            }
            TreeDefinition::Check(CheckerSpec::LifeBelow { ratio }) => {
                check_range("ratio", *ratio, 0.0, 1.0, path)
            }
            TreeDefinition::Check(CheckerSpec::ThreatImminent { margin }) => {
                check_range("margin", *margin, 0.0, f32::MAX, path)
            }
            TreeDefinition::Check(_) | TreeDefinition::Task(_) => Ok(()),
        }
    }

    fn build_node(&self) -> DecisionNode<AiContext> {
        match self {
            TreeDefinition::Selector(children) => {
                builder::selector(children.iter().map(Self::build_node).collect())
            }
            TreeDefinition::Sequence(children) => {
                builder::sequence(children.iter().map(Self::build_node).collect())
            }
            TreeDefinition::Check(spec) => match *spec {
                CheckerSpec::InHostileZone => builder::checker(IsInHostileZone),
                CheckerSpec::ThreatImminent { margin } => {
                    builder::checker(IsThreatImminent { margin })
                }
                CheckerSpec::InProjectilePath => builder::checker(IsInProjectilePath),
                CheckerSpec::Casting => builder::checker(IsCasting),
                CheckerSpec::HasState(kind) => builder::checker(HasState(kind)),
                CheckerSpec::Incapacitated => builder::checker(IsIncapacitated),
                CheckerSpec::LifeBelow { ratio } => builder::checker(IsLifeBelow { ratio }),
                CheckerSpec::HasDodgeCharge => builder::checker(HasDodgeCharge),
                CheckerSpec::Dodging => builder::checker(IsDodging),
                CheckerSpec::Chance => builder::chance(),
            },
            TreeDefinition::Task(spec) => match *spec {
                TaskSpec::ExitZone => builder::task(ExitZone),
                TaskSpec::Dodge { duration_ticks } => builder::task(Dodge::new(duration_ticks)),
                TaskSpec::Attack => builder::task(Attack),
                TaskSpec::Reposition => builder::task(Reposition),
                TaskSpec::Idle => builder::task(Idle),
                TaskSpec::ApplySelfState(kind) => builder::task(ApplySelfState(kind)),
            },
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32, path: &str) -> Result<(), TreeError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(TreeError::InvalidParameter {
            name,
            value,
            path: path.to_string(),
        })
    }
}

/// The minimal always-attack tree: attack, else idle.
pub fn fallback_tree() -> TreeDefinition {
    TreeDefinition::Selector(vec![
        TreeDefinition::Task(TaskSpec::Attack),
        TreeDefinition::Task(TaskSpec::Idle),
    ])
}

/// Builds a tree, substituting [`fallback_tree`] when `definition` is invalid.
///
/// The configuration error is logged once here; the caller gets a usable
/// tree either way.
pub fn spawn_tree(definition: &TreeDefinition, randomness: f32, seed: u64) -> BehaviorTree<AiContext> {
    let root = match definition.build() {
        Ok(root) => root,
        Err(error) => {
            report(&error);
            tracing::error!(target: "runtime::ai", "falling back to always-attack tree");
            fallback_tree().build_node()
        }
    };
    BehaviorTree::new(root, randomness, seed)
}

#[cfg(test)]
mod tests {
    use behavior_tree::{NodeKind, Status};
    use combat_core::{CharacterId, Team};

    use super::*;
    use crate::ai::CombatAction;

    #[test]
    fn empty_composite_is_a_configuration_error() {
        let def = TreeDefinition::Selector(vec![
            TreeDefinition::Sequence(vec![]),
            TreeDefinition::Task(TaskSpec::Idle),
        ]);
        assert_eq!(
            def.build().unwrap_err(),
            TreeError::EmptyComposite {
                kind: "sequence",
                path: "root/selector[0]".to_string(),
            }
        );
    }

    #[test]
    fn root_must_end_in_unconditional_task() {
        let def = TreeDefinition::Selector(vec![TreeDefinition::Task(TaskSpec::Attack)]);
        assert_eq!(def.build().unwrap_err(), TreeError::MissingFallback);

        let def = TreeDefinition::Sequence(vec![TreeDefinition::Task(TaskSpec::Idle)]);
        assert_eq!(def.build().unwrap_err(), TreeError::MissingFallback);

        assert!(TreeDefinition::Task(TaskSpec::Idle).build().is_ok());
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let def = TreeDefinition::Selector(vec![
            TreeDefinition::Sequence(vec![
                TreeDefinition::Check(CheckerSpec::LifeBelow { ratio: 1.5 }),
                TreeDefinition::Task(TaskSpec::Reposition),
            ]),
            TreeDefinition::Task(TaskSpec::Idle),
        ]);
        assert!(matches!(
            def.build(),
            Err(TreeError::InvalidParameter { name: "ratio", .. })
        ));
    }

    #[test]
    fn invalid_definition_spawns_fallback() {
        let mut tree = spawn_tree(&TreeDefinition::Selector(vec![]), 1.0, 0);
        assert_eq!(tree.root().kind(), NodeKind::Selector);
        assert_eq!(tree.root().child_count(), 2);

        let mut ctx = AiContext::new(CharacterId(0), Team(0)).with_target(CharacterId(1));
        assert_eq!(tree.tick(&mut ctx), Status::Success);
        assert_eq!(
            ctx.action(),
            Some(CombatAction::Attack {
                target: CharacterId(1)
            })
        );

        let mut alone = AiContext::new(CharacterId(0), Team(0));
        assert_eq!(tree.tick(&mut alone), Status::Success);
        assert_eq!(alone.action(), Some(CombatAction::Idle));
    }

    #[test]
    fn parses_from_ron() {
        let text = r#"
            Selector([
                Sequence([Check(HasState(Stun)), Task(Idle)]),
                Sequence([Check(ThreatImminent(margin: 0.5)), Check(Chance), Task(Dodge(duration_ticks: 2))]),
                Task(Attack),
                Task(Reposition),
            ])
        "#;
        let def: TreeDefinition = ron::from_str(text).unwrap();
        let root = def.build().unwrap();
        assert_eq!(root.child_count(), 4);
        assert_eq!(root.depth(), 3);
    }
}
