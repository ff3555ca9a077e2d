use gamedriver::{Error, LaunchConfig, Rect, Viewport, USER_AGENT_CHROME};

#[test]
fn viewport_round_trips_its_fields() -> anyhow::Result<()> {
    let viewport = Viewport::new(3, 7, 40, 20)?;
    assert_eq!(viewport.x(), 3);
    assert_eq!(viewport.y(), 7);
    assert_eq!(viewport.width(), 40);
    assert_eq!(viewport.height(), 20);
    assert_eq!(viewport.size(), (40, 20));
    assert_eq!(
        viewport.rect(),
        Rect {
            x: 3,
            y: 7,
            width: 40,
            height: 20,
        }
    );
    Ok(())
}

#[test]
fn zero_area_viewport_is_rejected() {
    for (width, height) in [(0, 10), (10, 0), (0, 0)] {
        let err = Viewport::new(1, 2, width, height).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { .. }), "{width}x{height}");
    }
}

#[test]
fn viewports_compare_by_field() -> anyhow::Result<()> {
    assert_eq!(Viewport::new(1, 2, 3, 4)?, Viewport::new(1, 2, 3, 4)?);
    assert_ne!(Viewport::new(1, 2, 3, 4)?, Viewport::new(1, 2, 3, 5)?);
    Ok(())
}

#[test]
fn launch_config_defaults() {
    let config = LaunchConfig::new("https://example.com/game");
    assert_eq!(config.width, 1280);
    assert_eq!(config.height, 720);
    assert_eq!(config.user_agent, USER_AGENT_CHROME);

    let config = config.with_size(800, 600).with_user_agent("bot/1.0");
    assert_eq!((config.width, config.height), (800, 600));
    assert_eq!(config.user_agent, "bot/1.0");
}
