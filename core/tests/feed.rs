mod support;

use support::FakeStage;
use vitrine_core::{
    boot, build_modal_content, AssetBase, FeedError, GridMode, ProjectIndex, ProjectStore,
    Timings, FEED_ERROR_MESSAGE, FEED_ERROR_TITLE,
};

#[test]
fn minimal_records_parse_with_defaults() {
    let store = ProjectStore::from_json(
        r#"[{"id":"project-01","heroMedia":{"type":"video","src":"a.webm"}},
            {"id":"project-02","heroMedia":{"type":"video","src":"b.webm"}}]"#,
    )
    .expect("minimal feed parses");
    assert_eq!(store.len(), 2);
    let second = store.get(ProjectIndex(1)).expect("second record");
    assert_eq!(second.hero_video_src(), Some("b.webm"));
    assert!(second.title.is_empty());
    assert!(second.year.is_empty());

    let content = build_modal_content(second, &AssetBase::default(), GridMode::Wide);
    assert_eq!(content.project_id, "project-02");
    assert_eq!(content.video_count(), 0);
}

#[test]
fn unknown_fields_and_null_year_are_tolerated() {
    let store = ProjectStore::from_json(
        r#"[{"id":"p","year":null,"featured":true,"heroMedia":{"type":"video","src":" "}}]"#,
    )
    .expect("feed parses");
    let project = store.by_id("p").expect("project");
    assert_eq!(project.year, "");
    assert_eq!(project.hero_video_src(), None, "blank hero source is no hero");
}

#[test]
fn every_load_failure_boots_into_the_error_presentation() {
    let failures = [
        FeedError::Network("connection refused".to_string()),
        FeedError::Status(404),
        ProjectStore::from_json("[{\"title\": 1}]").unwrap_err(),
    ];
    for failure in failures {
        let mut stage = FakeStage::default();
        let machine = boot(Err(failure), &mut stage, AssetBase::default(), Timings::default());
        assert!(machine.is_none());
        assert!(stage.navigation.is_none());
        assert_eq!(
            stage.feed_error,
            Some((FEED_ERROR_TITLE.to_string(), FEED_ERROR_MESSAGE.to_string()))
        );
    }
}

#[test]
fn errors_describe_their_cause() {
    assert_eq!(
        FeedError::Status(503).to_string(),
        "feed request returned status 503"
    );
    assert_eq!(
        FeedError::Network("offline".to_string()).to_string(),
        "feed request failed: offline"
    );
    let parse = ProjectStore::from_json("{}").unwrap_err();
    assert!(parse.to_string().starts_with("feed is not a valid project list"));
}
