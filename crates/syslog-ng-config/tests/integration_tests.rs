//! 통합 테스트 -- 설정 구성부터 파일 기록까지의 흐름 검증

use std::sync::Arc;

use proptest::prelude::*;

use ngtest_syslog_ng_config::{
    FileDestinationOptions, FileSourceOptions, FilterOptions, LogPath, LogPathInput, LogPathItem,
    OptionValue, Statement, StatementGroup, StatementKind, SyslogNgConfig, SyslogNgConfigError,
};

/// 구성 -> 렌더링 -> 기록 후 파일 내용이 렌더링 결과와 같아야 함
#[test]
fn test_write_content_matches_render() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = SyslogNgConfig::new(dir.path());
    config.set_version("3.38");
    config.create_global_options([("keep_hostname", OptionValue::from(true))]);

    let src = config.create_file_source(
        "input.log",
        FileSourceOptions {
            follow_freq: Some(1.0),
            ..Default::default()
        },
    );
    let dst = config.create_file_destination("output.log", FileDestinationOptions::default());
    config
        .create_logpath([LogPathInput::from(src), dst.into()], &["flow-control"])
        .unwrap();

    let config_path = dir.path().join("syslog_ng_server.conf");
    config.write_content(&config_path).unwrap();

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert_eq!(written, config.render());
    assert!(written.contains(&format!(
        "file(\"{}\" follow_freq(1));",
        dir.path().join("input.log").display()
    )));
}

/// 두 번 기록하면 이전 내용이 남지 않아야 함
#[test]
fn test_write_content_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("syslog_ng_server.conf");
    std::fs::write(&config_path, "x".repeat(4096)).unwrap();

    let mut config = SyslogNgConfig::new(dir.path());
    config.set_version("4.0");
    config.write_content(&config_path).unwrap();

    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "@version: 4.0\n");
}

/// 원시 구문 3개로 로그 경로를 만들면 그룹 3개가 순서대로 등록되어야 함
#[test]
fn test_raw_statements_are_wrapped() {
    let mut config = SyslogNgConfig::new("/work");
    let src = config.create_file_source("in.log", FileSourceOptions::default());
    let flt = config.create_filter(FilterOptions {
        level: Some("info..err".to_owned()),
        ..Default::default()
    });
    let dst = config.create_file_destination("out.log", FileDestinationOptions::default());

    config
        .create_logpath([LogPathInput::from(src), flt.into(), dst.into()], &[])
        .unwrap();

    let kinds: Vec<_> = config
        .statement_groups()
        .iter()
        .map(|g| g.group_type())
        .collect();
    assert_eq!(
        kinds,
        vec![StatementKind::Source, StatementKind::Filter, StatementKind::Destination]
    );
    assert_eq!(config.logpath_groups().len(), 1);
    assert_eq!(config.logpath_groups()[0].logpath().len(), 3);
}

/// 미리 만든 그룹은 다시 감싸지 않고 같은 인스턴스를 참조해야 함
#[test]
fn test_prebuilt_group_is_shared() {
    let mut config = SyslogNgConfig::new("/work");
    let src = config.create_file_source("in.log", FileSourceOptions::default());
    let group = config.create_statement_group([src]).unwrap();

    let d1 = config.create_file_destination("a.log", FileDestinationOptions::default());
    let d2 = config.create_file_destination("b.log", FileDestinationOptions::default());
    config
        .create_logpath([LogPathInput::from(Arc::clone(&group)), d1.into()], &[])
        .unwrap();
    config
        .create_logpath([LogPathInput::from(Arc::clone(&group)), d2.into()], &[])
        .unwrap();

    // source 1개 + destination 2개
    assert_eq!(config.statement_groups().len(), 3);
    for logpath in config.logpath_groups() {
        match &logpath.logpath()[0] {
            LogPathItem::Group(g) => assert!(Arc::ptr_eq(g, &group)),
            other => panic!("expected group, got {other:?}"),
        }
    }

    let rendered = config.render();
    assert_eq!(rendered.matches("source source_1 {").count(), 1);
    assert_eq!(rendered.matches("source(source_1);").count(), 2);
}

/// 내부 로그 경로는 최상위 목록에 등록되지 않아야 함
#[test]
fn test_inner_logpath_not_registered() {
    let mut config = SyslogNgConfig::new("/work");
    let dst = config.create_file_destination("copy.log", FileDestinationOptions::default());
    let inner = config
        .create_inner_logpath([LogPathInput::from(dst)], &["final"])
        .unwrap();

    assert!(config.logpath_groups().is_empty());
    assert_eq!(config.statement_groups().len(), 1);

    let src = config.create_file_source("in.log", FileSourceOptions::default());
    config
        .create_logpath([LogPathInput::from(src), inner.into()], &[])
        .unwrap();
    assert_eq!(config.logpath_groups().len(), 1);

    let rendered = config.render();
    assert!(rendered.contains("    log {\n        destination(destination_1);\n        flags(final);\n    };\n"));
}

/// 혼합 구문 목록은 에러이며 부분 등록이 없어야 함
#[test]
fn test_mixed_statements_rejected() {
    let mut config = SyslogNgConfig::new("/work");
    let src = config.create_file_source("in.log", FileSourceOptions::default());
    let dst = config.create_file_destination("out.log", FileDestinationOptions::default());

    let err = config
        .create_logpath([LogPathInput::from(vec![src, dst])], &[])
        .unwrap_err();
    assert!(matches!(err, SyslogNgConfigError::MixedGroup { .. }));
    assert!(config.statement_groups().is_empty());
    assert!(config.logpath_groups().is_empty());
}

/// 뒤쪽 항목이 실패하면 앞서 감싼 그룹도 등록되지 않아야 함
#[test]
fn test_failed_logpath_leaves_no_orphan_groups() {
    let mut config = SyslogNgConfig::new("/work");
    let src = config.create_file_source("in.log", FileSourceOptions::default());
    let dst = config.create_file_destination("out.log", FileDestinationOptions::default());

    let err = config
        .create_logpath(
            [
                LogPathInput::from(src.clone()),
                dst.clone().into(),
                LogPathInput::from(Vec::<Statement>::new()),
            ],
            &["final"],
        )
        .unwrap_err();
    assert!(matches!(err, SyslogNgConfigError::EmptyGroup { .. }));
    assert!(config.statement_groups().is_empty());
    assert!(config.logpath_groups().is_empty());
    assert_eq!(config.render(), "");

    // 실패한 호출은 자동 식별자 번호도 소비하지 않음
    config
        .create_logpath([LogPathInput::from(src), dst.into()], &[])
        .unwrap();
    let ids: Vec<_> = config.statement_groups().iter().map(|g| g.id().to_owned()).collect();
    assert_eq!(ids, vec!["source_1", "destination_2"]);
}

/// 같은 입력이면 내부 로그 경로와 최상위 로그 경로의 구성이 같아야 함
#[test]
fn test_inner_logpath_matches_top_level_logpath() {
    fn inputs(config: &SyslogNgConfig) -> Vec<LogPathInput> {
        vec![
            LogPathInput::from(config.create_file_source("in.log", FileSourceOptions::default())),
            config
                .create_filter(FilterOptions {
                    program: Some("app".to_owned()),
                    ..Default::default()
                })
                .into(),
            config
                .create_file_destination("out.log", FileDestinationOptions::default())
                .into(),
            LogPath::new().into(),
        ]
    }

    let mut config = SyslogNgConfig::new("/work");
    let first = inputs(&config);
    let inner = config
        .create_inner_logpath(first, &["final", "flow-control"])
        .unwrap();
    let second = inputs(&config);
    let top = config
        .create_logpath(second, &["final", "flow-control"])
        .unwrap()
        .clone();

    assert_eq!(inner.flags(), top.flags());
    assert_eq!(inner.group_type(), top.group_type());

    let types = |logpath: &LogPath| -> Vec<&'static str> {
        logpath.logpath().iter().map(LogPathItem::group_type).collect()
    };
    assert_eq!(types(&inner), types(&top));
    assert_eq!(types(&inner), vec!["source", "filter", "destination", "log"]);

    // 그룹은 호출마다 새로 감싸지므로 식별자만 다름
    assert_eq!(config.statement_groups().len(), 6);
    assert_eq!(config.logpath_groups().len(), 1);
}

/// 옵션 레코드는 YAML에서 읽을 수 있고 알 수 없는 키는 거부해야 함
#[test]
fn test_options_from_yaml() {
    let options: FileDestinationOptions =
        serde_yaml::from_str("template: \"$MSG\\n\"\nperm: 420\ncreate_dirs: true\n")
            .unwrap();
    assert_eq!(options.template.as_deref(), Some("$MSG\n"));
    assert_eq!(options.perm, Some(0o644));
    assert_eq!(options.create_dirs, Some(true));

    let err = serde_yaml::from_str::<FilterOptions>("programme: app\n");
    assert!(err.is_err());
}

/// 여러 호출에 걸친 전역 옵션 병합
#[test]
fn test_global_options_merge() {
    let mut config = SyslogNgConfig::new("/work");
    config.create_global_options([("stats_level", 1)]);
    config.create_global_options([("stats_level", 2), ("use_dns", 0)]);
    config.create_global_options([("stats_level", 3)]);

    assert_eq!(config.global_options().len(), 2);
    assert_eq!(config.global_options()["stats_level"], OptionValue::Int(3));
    assert!(config.render().starts_with("options {\n    stats_level(3);\n    use_dns(0);\n};\n"));
}

fn dummy_group(id: String, kind: u8) -> Arc<StatementGroup> {
    let statement: Statement = match kind % 3 {
        0 => ngtest_syslog_ng_config::FileSource::new("in.log").into(),
        1 => ngtest_syslog_ng_config::FileDestination::new("out.log").into(),
        _ => ngtest_syslog_ng_config::Filter::new(FilterOptions {
            program: Some("app".to_owned()),
            ..Default::default()
        })
        .into(),
    };
    Arc::new(StatementGroup::new(id, [statement]).unwrap())
}

proptest! {
    /// 종류와 무관하게 추가 순서가 그대로 유지되어야 함
    #[test]
    fn prop_logpath_keeps_insertion_order(kinds in proptest::collection::vec(0u8..4, 0..20)) {
        let mut logpath = LogPath::new();
        let mut expected = Vec::new();
        for (i, kind) in kinds.iter().enumerate() {
            let id = format!("g_{i}");
            match kind {
                0 => logpath.add_source_group(dummy_group(id.clone(), 0)),
                1 => logpath.add_destination_group(dummy_group(id.clone(), 1)),
                2 => logpath.add_filter_group(dummy_group(id.clone(), 2)),
                _ => logpath.add_logpath_group(LogPath::new()),
            }
            expected.push(if *kind == 3 { None } else { Some(id) });
        }

        let actual: Vec<_> = logpath
            .logpath()
            .iter()
            .map(|item| match item {
                LogPathItem::Group(g) => Some(g.id().to_owned()),
                LogPathItem::LogPath(_) => None,
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// 플래그는 순서와 중복을 유지해야 함
    #[test]
    fn prop_flags_keep_order(flags in proptest::collection::vec("[a-z-]{1,12}", 0..10)) {
        let mut logpath = LogPath::new();
        for flag in &flags {
            logpath.add_flag(flag.clone());
        }
        prop_assert_eq!(logpath.flags(), flags.as_slice());
    }

    /// 전역 옵션은 이름별로 마지막 값만 남아야 함
    #[test]
    fn prop_global_options_last_write_wins(
        entries in proptest::collection::vec(("[a-z_]{1,6}", any::<i64>()), 0..30)
    ) {
        let mut config = SyslogNgConfig::new("/work");
        for (name, value) in &entries {
            config.create_global_options([(name.clone(), *value)]);
        }
        for (name, value) in config.global_options() {
            let last = entries
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| OptionValue::Int(*v));
            prop_assert_eq!(Some(value.clone()), last);
        }
    }
}
