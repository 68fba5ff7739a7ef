//! End-to-end tests for the curation pipeline over in-memory sources.

use std::path::Path;

use m3u_curator::config::Config;
use m3u_curator::pipeline::Curator;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Config rooted in a temp directory so runs never touch the real tree.
fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.output.dir = root.join("output");
    config.output.rewritten_multicast = root.join("custom_m3u/multicast-local.m3u");
    config.store.path = root.join("data/learned_aliases.json");
    config.blacklist.domains = vec!["badcdn.tv".to_string()];
    config
}

fn multicast_source() -> Vec<String> {
    lines(&[
        "#EXTM3U",
        "#EXTINF:-1,CCTV1 高清",
        "http://10.1.2.3:8088/rtp/239.1.1.1:5140",
        "#EXTINF:-1,山东卫视",
        "http://10.1.2.3:8088/rtp/239.1.1.2:5140",
    ])
}

fn http_source() -> Vec<String> {
    lines(&[
        "#EXTM3U",
        "#EXTINF:-1,山东卫视",
        "http://custom.example/sdtv.m3u8",
        "#EXTINF:-1,XYZ-9",
        "http://custom.example/xyz9.m3u8",
    ])
}

fn validated_source() -> Vec<String> {
    lines(&[
        "#EXTM3U",
        r#"#EXTINF:-1 tvg-name="CCTV-1" tvg-logo="http://stale/logo.png" group-title="stale",CCTV-1 高清"#,
        "http://validated.example/cctv1.m3u8",
        "#EXTINF:-1,山东卫视",
        "http://validated.example/sdtv.m3u8",
        "#EXTINF:-1,翡翠台",
        "http://ads.badcdn.tv/jade.m3u8",
    ])
}

#[test]
fn curates_categorised_summary_and_flagged_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let curator = Curator::new(config);

    let report = curator
        .curate_sources(
            Some(multicast_source()),
            Some(http_source()),
            Some(validated_source()),
        )
        .unwrap();

    assert_eq!(report.flagged, 1);
    assert!(report.unresolved >= 1);

    // Scenario: the CCTV1 variants land in the national category under the
    // canonical identity, with corrected metadata.
    let national = std::fs::read_to_string(dir.path().join("output/央视.m3u")).unwrap();
    assert!(national.starts_with("#EXTM3U\n"));
    assert!(national.contains(
        "#EXTINF:-1 tvg-name=\"CCTV-1综合\" tvg-logo=\
         \"https://raw.githubusercontent.com/fanmingming/live/main/tv/CCTV-1综合.png\" \
         group-title=\"央视\",CCTV-1综合"
    ));

    // The multicast URL was rewritten to the gateway and outranks the
    // validated one.
    let gateway_url = "http://192.168.31.2:4022/rtp/239.1.1.1:5140";
    let validated_url = "http://validated.example/cctv1.m3u8";
    let gateway_pos = national.find(gateway_url).unwrap();
    let validated_pos = national.find(validated_url).unwrap();
    assert!(gateway_pos < validated_pos);

    // Custom URL precedence within the 山东卫视 bucket: multicast, then
    // custom HTTP, then validated.
    let provincial = std::fs::read_to_string(dir.path().join("output/卫视.m3u")).unwrap();
    let m = provincial.find("http://192.168.31.2:4022/rtp/239.1.1.2:5140").unwrap();
    let h = provincial.find("http://custom.example/sdtv.m3u8").unwrap();
    let v = provincial.find("http://validated.example/sdtv.m3u8").unwrap();
    assert!(m < h && h < v);

    // The blacklisted URL is absent from the summary and present in the
    // flagged playlist.
    let summary = std::fs::read_to_string(dir.path().join("output/summary.m3u")).unwrap();
    let flagged = std::fs::read_to_string(dir.path().join("output/flagged.m3u")).unwrap();
    assert!(!summary.contains("badcdn.tv"));
    assert!(flagged.contains("http://ads.badcdn.tv/jade.m3u8"));
    assert!(flagged.contains("翡翠台"));

    // Side artifact mirrors the rewritten multicast source.
    let side =
        std::fs::read_to_string(dir.path().join("custom_m3u/multicast-local.m3u")).unwrap();
    assert!(side.contains("#EXTINF:-1,CCTV1 高清"));
    assert!(side.contains(gateway_url));
    assert!(!side.contains("http://10.1.2.3:8088/rtp/239.1.1.1:5140"));
}

#[test]
fn unresolved_names_are_learned_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let curator = Curator::new(config.clone());

    curator
        .curate_sources(None, Some(http_source()), None)
        .unwrap();

    let store = std::fs::read_to_string(&config.store.path).unwrap();
    let learned: std::collections::HashMap<String, String> =
        serde_json::from_str(&store).unwrap();
    assert_eq!(learned.get("XYZ-9"), Some(&"XYZ-9".to_string()));
}

#[test]
fn identical_inputs_produce_byte_identical_outputs() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    for dir in [&dir_a, &dir_b] {
        let curator = Curator::new(test_config(dir.path()));
        curator
            .curate_sources(
                Some(multicast_source()),
                Some(http_source()),
                Some(validated_source()),
            )
            .unwrap();
    }

    for name in [
        "output/央视.m3u",
        "output/卫视.m3u",
        "output/地方.m3u",
        "output/港台.m3u",
        "output/国际.m3u",
        "output/4K.m3u",
        "output/网络直播.m3u",
        "output/其他.m3u",
        "output/summary.m3u",
        "output/flagged.m3u",
        "data/learned_aliases.json",
    ] {
        let a = std::fs::read(dir_a.path().join(name)).unwrap();
        let b = std::fs::read(dir_b.path().join(name)).unwrap();
        assert_eq!(a, b, "output {} differs between identical runs", name);
    }
}

#[test]
fn run_with_no_sources_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let curator = Curator::new(test_config(dir.path()));
    let result = curator.curate_sources(None, None, None);
    assert!(result.is_err());
}

#[test]
fn single_surviving_source_is_enough() {
    let dir = tempfile::tempdir().unwrap();
    let curator = Curator::new(test_config(dir.path()));
    let report = curator
        .curate_sources(None, None, Some(validated_source()))
        .unwrap();
    assert!(report.channels >= 2);

    // No custom source ran, so nothing is hoisted and no side artifact
    // exists.
    assert!(!dir.path().join("custom_m3u/multicast-local.m3u").exists());
}
