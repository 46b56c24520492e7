use behavior_tree::Status;
use combat_core::{
    CharacterError, CharacterSpec, EffectPayload, EffectResolution, EffectSpec, HitOutcome,
    StatusEffectKind, StatusEvent, Team,
};
use combat_runtime::{
    Archetype, AttackProfile, CombatAction, CombatEvent, Event, RuntimeConfig, RuntimeError,
    SensorReadings, Simulation, TaskSpec, Topic, TreeDefinition,
};

fn config() -> RuntimeConfig {
    RuntimeConfig {
        randomness: 1.0,
        ..RuntimeConfig::default()
    }
}

fn simulation() -> Simulation {
    Simulation::authoritative(config()).unwrap()
}

#[test]
fn effects_resolve_before_decisions() {
    let mut sim = simulation();
    let free = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100), Archetype::Bruiser)
        .unwrap();
    let stunned = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100), Archetype::Bruiser)
        .unwrap();
    let _target = sim
        .spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();

    let one_tick = EffectPayload::with_duration(sim.config().tick_seconds);
    sim.apply_effect(None, free, StatusEffectKind::Stun, one_tick)
        .unwrap();
    sim.apply_effect(None, stunned, StatusEffectKind::Stun, EffectPayload::with_duration(1.0))
        .unwrap();

    let report = sim.step();

    assert!(matches!(
        report.decision(free).unwrap().action,
        Some(CombatAction::Attack { .. })
    ));
    assert_eq!(
        report.decision(stunned).unwrap().action,
        Some(CombatAction::Idle)
    );
}

#[test]
fn attacks_reduce_life_of_the_first_enemy() {
    let mut sim = simulation();
    let attacker = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100), Archetype::Bruiser)
        .unwrap();
    let target = sim
        .spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();

    let report = sim.step();

    assert_eq!(report.tick, 0);
    assert_eq!(
        report.decision(attacker).unwrap().action,
        Some(CombatAction::Attack { target })
    );
    let damage = sim.config().attack_damage;
    assert_eq!(sim.roster().get(target).unwrap().life.current, 100 - damage);
    assert_eq!(sim.tick(), 1);
}

#[test]
fn on_hit_amplifier_consumes_marker_stacks() {
    let mut sim = simulation();
    let attacker = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100), Archetype::Bruiser)
        .unwrap();
    let target = sim
        .spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();
    sim.set_attack(
        attacker,
        AttackProfile::new(10).with_on_hit(EffectSpec::new(StatusEffectKind::Execute)),
    )
    .unwrap();
    for _ in 0..3 {
        sim.apply_effect(Some(attacker), target, StatusEffectKind::Marked, EffectPayload::default())
            .unwrap();
    }
    let mut combat = sim.bus().subscribe(Topic::Combat);

    let report = sim.step();

    let victim = sim.roster().get(target).unwrap();
    assert_eq!(victim.life.current, 100 - 10 - 45);
    assert!(!victim.effects.has_state(StatusEffectKind::Marked));
    assert!(victim.effects.has_state(StatusEffectKind::Stun));
    assert_eq!(sim.roster().get(attacker).unwrap().resource.current, 30);
    assert!(report.deaths.is_empty());

    let mut consumed = None;
    while let Ok(event) = combat.try_recv() {
        if let Event::Combat(CombatEvent::Consumed { stacks, .. }) = event {
            consumed = Some(stacks);
        }
    }
    assert_eq!(consumed, Some(3));
}

#[test]
fn multi_tick_dodge_spends_one_charge_and_blocks_hits() {
    let mut sim = simulation();
    let dodger = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100).with_dodges(2), Archetype::Skirmisher)
        .unwrap();
    let enemy = sim
        .spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();
    sim.set_sensors(dodger, Some(SensorReadings::projectile().shared()))
        .unwrap();

    let first = sim.step();
    let decision = first.decision(dodger).unwrap();
    assert_eq!(decision.status, Status::Running);
    assert_eq!(decision.action, Some(CombatAction::Dodge));
    assert_eq!(sim.roster().get(dodger).unwrap().dodge_charges, 1);

    let blocked = sim.hit(enemy, dodger, 50).unwrap();
    assert_eq!(blocked.outcome, HitOutcome::Blocked);

    let second = sim.step();
    assert_eq!(
        second.decision(dodger).unwrap().action,
        Some(CombatAction::Dodging)
    );
    let third = sim.step();
    assert_eq!(third.decision(dodger).unwrap().status, Status::Success);
    assert_eq!(sim.roster().get(dodger).unwrap().dodge_charges, 1);
}

#[test]
fn dodge_started_on_the_last_charge_runs_to_completion() {
    let mut sim = simulation();
    let dodger = sim
        .spawn_with(&CharacterSpec::new(Team(0), 100).with_dodges(1), Archetype::Skirmisher)
        .unwrap();
    sim.spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();
    sim.set_sensors(dodger, Some(SensorReadings::projectile().shared()))
        .unwrap();

    let outcomes: Vec<_> = (0..3)
        .map(|_| {
            let report = sim.step();
            let decision = report.decision(dodger).unwrap();
            (decision.status, decision.action)
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            (Status::Running, Some(CombatAction::Dodge)),
            (Status::Running, Some(CombatAction::Dodging)),
            (Status::Success, Some(CombatAction::Dodging)),
        ]
    );
    assert_eq!(sim.roster().get(dodger).unwrap().dodge_charges, 0);
}

#[test]
fn periodic_damage_can_kill_and_dead_characters_stop_deciding() {
    let mut sim = Simulation::authoritative(RuntimeConfig {
        tick_seconds: 0.5,
        ..config()
    })
    .unwrap();
    let victim = sim
        .spawn_with(&CharacterSpec::new(Team(0), 4), Archetype::Bruiser)
        .unwrap();
    sim.apply_effect(None, victim, StatusEffectKind::Burn, EffectPayload::default())
        .unwrap();

    assert!(sim.step().deaths.is_empty());
    let second = sim.step();
    assert_eq!(second.deaths, vec![victim]);
    assert!(second.decision(victim).is_none());
    assert!(sim.roster().get(victim).unwrap().effects.is_empty());
}

#[test]
fn status_events_are_drained_onto_the_bus() {
    let mut sim = simulation();
    let id = sim.spawn(&CharacterSpec::new(Team(0), 50)).unwrap();
    let mut status = sim.bus().subscribe(Topic::Status);

    sim.apply_effect(None, id, StatusEffectKind::Slow, EffectPayload::default())
        .unwrap();
    assert!(status.try_recv().is_err());

    sim.step();
    assert_eq!(
        status.try_recv().unwrap(),
        Event::Status(StatusEvent::Applied {
            owner: id,
            kind: StatusEffectKind::Slow,
            source: None,
        })
    );
}

#[test]
fn invalid_tree_falls_back_and_unknown_character_is_fatal() {
    let mut sim = simulation();
    let id = sim.spawn(&CharacterSpec::new(Team(0), 50)).unwrap();
    let _enemy = sim.spawn(&CharacterSpec::new(Team(1), 50)).unwrap();

    let broken = TreeDefinition::Selector(vec![TreeDefinition::Task(TaskSpec::Attack)]);
    sim.attach_tree(id, &broken).unwrap();
    assert!(matches!(
        sim.step().decision(id).unwrap().action,
        Some(CombatAction::Attack { .. })
    ));

    let missing = combat_core::CharacterId(99);
    assert!(matches!(
        sim.attach_tree(missing, &broken),
        Err(RuntimeError::UnknownCharacter(id)) if id == missing
    ));
}

#[test]
fn replicas_mirror_state_without_mutating() {
    let mut owner = simulation();
    let hero = owner
        .spawn_with(&CharacterSpec::new(Team(0), 100), Archetype::Bruiser)
        .unwrap();
    let foe = owner
        .spawn_with(&CharacterSpec::new(Team(1), 100), Archetype::Dummy)
        .unwrap();
    owner
        .apply_effect(Some(hero), foe, StatusEffectKind::Poison, EffectPayload::default())
        .unwrap();
    owner.step();

    let mut replica = Simulation::replica(config()).unwrap();
    assert!(replica.ingest_json(&owner.snapshot_json().unwrap()).unwrap());

    let mirrored = replica.roster().get(foe).unwrap();
    assert_eq!(mirrored.life, owner.roster().get(foe).unwrap().life);
    assert!(mirrored.effects.has_state(StatusEffectKind::Poison));

    assert_eq!(
        replica
            .apply_effect(None, foe, StatusEffectKind::Stun, EffectPayload::default())
            .unwrap(),
        EffectResolution::Ignored
    );
    assert_eq!(replica.hit(hero, foe, 30).unwrap().outcome, HitOutcome::Ignored);
    assert!(replica.step().decisions.is_empty());
    assert!(matches!(
        replica.despawn(foe),
        Err(RuntimeError::Character(CharacterError::NotAuthoritative))
    ));
    assert!(replica.roster().contains(foe));
    assert_eq!(replica.roster().len(), owner.roster().len());

    assert!(!owner.ingest(&replica.snapshot()));
}

#[test]
fn same_seed_same_decisions() {
    let run = |seed: u64| {
        let mut sim = Simulation::authoritative(RuntimeConfig {
            seed,
            randomness: 0.5,
            dodge_ticks: 1,
            ..RuntimeConfig::default()
        })
        .unwrap();
        let id = sim
            .spawn_with(&CharacterSpec::new(Team(0), 1000).with_dodges(50), Archetype::Skirmisher)
            .unwrap();
        sim.spawn_with(&CharacterSpec::new(Team(1), 1000), Archetype::Dummy)
            .unwrap();
        sim.set_sensors(id, Some(SensorReadings::projectile().shared()))
            .unwrap();
        (0..20)
            .map(|_| sim.step().decision(id).and_then(|d| d.action))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(11), run(11));
}
