//! Effect application with kind-specific hooks.
//!
//! The registry only knows apply/refresh/remove/shield primitives. Pairings
//! between kinds (the consumption chain) are declared per kind as an
//! [`ApplyHook`] and executed here, where both caster and target are
//! reachable through the [`CharacterTable`].

use crate::character::{CharacterError, CharacterId, CharacterTable};
use crate::status::{ApplyHook, ApplyOutcome, EffectPayload, StatusEffectKind};

use super::hit::{HitResult, resolve_hit};

/// One entry of a spell's on-hit effect list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub kind: StatusEffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: EffectPayload,
}

impl EffectSpec {
    pub fn new(kind: StatusEffectKind) -> Self {
        Self {
            kind,
            payload: EffectPayload::default(),
        }
    }

    pub fn with_payload(kind: StatusEffectKind, payload: EffectPayload) -> Self {
        Self { kind, payload }
    }
}

/// What a consumption chain did once its marker was found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Consumption {
    pub marker: StatusEffectKind,
    /// Marker stacks removed from the target.
    pub stacks: u8,
    pub burst: HitResult,
    /// Resource added to the caster (0 if the caster is gone).
    pub resource_granted: u32,
    /// `None` when the burst killed the target.
    pub stun: Option<ApplyOutcome>,
    /// Outcome of applying the amplifier itself; `None` for instant kinds
    /// and when the burst killed the target.
    pub amplifier: Option<ApplyOutcome>,
}

/// Result of [`apply_effect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectResolution {
    /// Dead target or replica roster.
    Ignored,
    /// Plain registry application.
    Applied(ApplyOutcome),
    /// The marker was missing, so it was applied in place of the amplifier.
    PreconditionSwapped {
        marker: StatusEffectKind,
        outcome: ApplyOutcome,
    },
    /// The marker was consumed into the amplified outcome.
    Consumed(Consumption),
}

/// Applies `kind` from `caster` to `target`, running the kind's apply hook.
///
/// Fails only when `target` does not exist. The caster is optional and may
/// be despawned already; it is only needed for resource grants.
pub fn apply_effect(
    roster: &mut CharacterTable,
    caster: Option<CharacterId>,
    target: CharacterId,
    kind: StatusEffectKind,
    payload: EffectPayload,
) -> Result<EffectResolution, CharacterError> {
    if roster.authority().is_replica() {
        tracing::trace!(target: "combat::apply", kind = kind.label(), "ignored on replica");
        return Ok(EffectResolution::Ignored);
    }
    let hook = roster.effect_table().get(kind).on_apply;
    let victim = roster.get_mut(target).ok_or(CharacterError::Unknown(target))?;
    if !victim.is_alive() {
        return Ok(EffectResolution::Ignored);
    }

    let Some(ApplyHook::Consume {
        marker,
        burst_per_stack,
        resource_per_stack,
        stun,
        stun_duration,
    }) = hook
    else {
        return Ok(EffectResolution::Applied(
            victim.effects.apply(kind, caster, payload),
        ));
    };

    if !victim.effects.has_state(marker) {
        let outcome = victim.effects.apply(marker, caster, EffectPayload::default());
        tracing::debug!(
            target: "combat::apply",
            %target,
            amplifier = kind.label(),
            marker = marker.label(),
            "marker absent, applying marker instead"
        );
        return Ok(EffectResolution::PreconditionSwapped { marker, outcome });
    }

    let stacks = victim.effects.remove_state(marker);
    let burst = resolve_hit(victim, burst_per_stack.saturating_mul(u32::from(stacks)));

    let (stun_outcome, amplifier) = if victim.is_alive() {
        // The stun is forced to its fixed duration even if one is already live.
        victim.effects.remove_state(stun);
        let stun_outcome = victim
            .effects
            .apply(stun, caster, EffectPayload::with_duration(stun_duration));
        let amplifier = if victim.effects.table().get(kind).is_instant() {
            None
        } else {
            Some(victim.effects.apply(kind, caster, payload))
        };
        (Some(stun_outcome), amplifier)
    } else {
        (None, None)
    };

    let grant = resource_per_stack.saturating_mul(u32::from(stacks));
    let resource_granted = caster
        .and_then(|id| roster.get_mut(id))
        .map_or(0, |c| c.gain_resource(grant));

    tracing::debug!(
        target: "combat::apply",
        %target,
        amplifier = kind.label(),
        marker = marker.label(),
        stacks,
        burst = burst.dealt + burst.absorbed,
        resource_granted,
        "marker consumed"
    );

    Ok(EffectResolution::Consumed(Consumption {
        marker,
        stacks,
        burst,
        resource_granted,
        stun: stun_outcome,
        amplifier,
    }))
}

/// Applies a spell's on-hit list to `target`, in order, once.
///
/// Entries after the target dies resolve to [`EffectResolution::Ignored`].
pub fn apply_on_hit(
    roster: &mut CharacterTable,
    caster: Option<CharacterId>,
    target: CharacterId,
    effects: &[EffectSpec],
) -> Result<Vec<EffectResolution>, CharacterError> {
    effects
        .iter()
        .map(|spec| apply_effect(roster, caster, target, spec.kind, spec.payload))
        .collect()
}
