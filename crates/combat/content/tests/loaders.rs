use std::fs;

use combat_content::{ConfigLoader, ContentFactory, SkillLoader};
use combat_core::{CombatConfig, EntityId, SkillRange, TalentKind, Team};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn bundled_content_loads() {
    let factory = ContentFactory::bundled();

    let config = factory.load_config().unwrap();
    assert_eq!(config, CombatConfig::default());

    let skills = factory.load_skills().unwrap();
    assert!(skills.get("Tackle").is_some());
    assert_eq!(
        skills.get("Surf").map(|s| s.range),
        Some(SkillRange::Line { length: 3 })
    );

    let loadout = factory.load_loadout().unwrap();
    assert_eq!(loadout.talents.rank(TalentKind::ChainMaster), 1);

    let encounter = factory.load_encounter("training_grounds").unwrap();
    assert_eq!(encounter.state.roster.player_id(), Some(EntityId::PLAYER));
    assert_eq!(
        encounter
            .state
            .roster
            .iter()
            .filter(|c| c.team == Team::Enemy)
            .count(),
        3
    );
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
}

#[test]
fn missing_skill_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());

    let err = factory.load_skills().unwrap_err();
    assert!(format!("{err:#}").contains("skills.ron"));
}

#[test]
fn config_overrides_from_disk() {
    let dir = TempDir::new().unwrap();
    write(&dir, "combat.toml", "paralysis_skip_chance = 50\n");

    let config = ConfigLoader::load(&dir.path().join("combat.toml")).unwrap();
    assert_eq!(config.paralysis_skip_chance, 50);
    assert_eq!(config.thorns_percent, 10);
}

#[test]
fn malformed_catalog_reports_file_context() {
    let dir = TempDir::new().unwrap();
    write(&dir, "skills.ron", "(skills: [ (name: \"Oops\" ) ])");

    let err = SkillLoader::load(&dir.path().join("skills.ron")).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Invalid skill catalog"));
    assert!(message.contains("Failed to parse skill catalog RON"));
}

#[test]
fn encounters_load_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "encounters/duel.ron",
        r#"(
            name: "Duel",
            seed: 1,
            width: 3,
            height: 1,
            combatants: [
                (
                    id: 0, name: "A", team: Player,
                    typing: (primary: Normal, secondary: None),
                    max_hp: 10, atk: 5, def: 5, position: (0, 0),
                ),
                (
                    id: 7, name: "B", team: Enemy,
                    typing: (primary: Normal, secondary: None),
                    max_hp: 10, atk: 5, def: 5, position: (2, 0),
                ),
            ],
        )"#,
    );

    let encounter = ContentFactory::new(dir.path())
        .load_encounter("duel")
        .unwrap();
    assert_eq!(encounter.state.roster.len(), 2);
    assert!(encounter.state.roster.get(EntityId(7)).is_some());
}
