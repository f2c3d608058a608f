use side_shooter::config::GameConfig;
use side_shooter::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.validate(), Ok(()));
    assert_eq!(cfg.spawn_band(), (50, 450));
    assert_eq!(cfg.player_bottom(), 480);
}

#[test]
fn with_screen_keeps_other_tunables() {
    let cfg = GameConfig::with_screen(1024, 768);
    assert_eq!((cfg.width, cfg.height), (1024, 768));
    assert_eq!(cfg.spawn_band(), (50, 618));
    assert_eq!(cfg.max_ammo, 10);
    assert_eq!(cfg.fps, 60);
}

#[test]
fn rejects_short_screen() {
    let err = GameConfig::with_screen(800, 199).validate().unwrap_err();
    assert_eq!(
        err,
        ConfigError::ScreenTooSmall { width: 800, height: 199, min_width: 170, min_height: 200 }
    );
    assert!(err.to_string().contains("800x199"));
}

#[test]
fn rejects_empty_ranges() {
    let cfg = GameConfig { wave_size: (5, 3), ..GameConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::EmptyRange { what: "wave size", .. })));

    let cfg = GameConfig { enemy_speed: (0, 7), ..GameConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::EmptyRange { what: "enemy speed", .. })));
}

#[test]
fn rejects_zero_fps_and_ammo() {
    let cfg = GameConfig { fps: 0, ..GameConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroFps));
    let cfg = GameConfig { max_ammo: 0, ..GameConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroAmmo));
}

#[test]
fn rejects_screen_whose_wave_would_overflow() {
    let cfg = GameConfig::with_screen(i32::MAX, 600);
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::ScreenTooLarge { width: i32::MAX, height: 600 })
    );

    // Room for the default screen plus a full staggered wave is fine...
    let edge = i32::MAX - 4 * 150 - 120;
    assert_eq!(GameConfig::with_screen(edge, 600).validate(), Ok(()));
    // ...one more unit is not.
    assert!(matches!(
        GameConfig::with_screen(edge + 1, 600).validate(),
        Err(ConfigError::ScreenTooLarge { .. })
    ));
}

#[test]
fn rejects_screen_whose_hitboxes_would_overflow() {
    let cfg = GameConfig::with_screen(800, i32::MAX - 100);
    assert!(matches!(cfg.validate(), Err(ConfigError::ScreenTooLarge { .. })));
}

#[test]
fn session_refuses_oversized_screen_instead_of_spawning() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use side_shooter::Session;

    let cfg = GameConfig::with_screen(i32::MAX, 600);
    let result = Session::new(cfg, &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(ConfigError::ScreenTooLarge { .. })));
}
