use watcher_core::SelectorPath;

#[test]
fn splits_trims_and_drops_empty_segments() {
    let path = SelectorPath::parse(" #main | .content||  #first ");
    assert_eq!(path.steps(), ["#main", ".content", "#first"]);
    assert_eq!(path.as_str(), " #main | .content||  #first ");
    assert!(!path.is_blank());
}

#[test]
fn blank_path_tracks_body() {
    for raw in ["", "   ", "\t\n"] {
        let path = SelectorPath::parse(raw);
        assert!(path.is_blank(), "{raw:?} should be blank");
        assert!(path.steps().is_empty());
        assert_eq!(path.to_string(), "entire body");
    }
}

#[test]
fn pipes_only_is_not_blank_but_has_no_steps() {
    let path = SelectorPath::parse(" | ");
    assert!(!path.is_blank());
    assert!(path.steps().is_empty());
}

#[test]
fn display_shows_configured_path() {
    assert_eq!(SelectorPath::parse("#a|#b").to_string(), "#a|#b");
}
