use std::{fs, marker::PhantomData, thread};

use anyhow::Result;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use locbake::core::{
    BoundCompound, BoundSubstitutions, KeyBinding, Localizable, LocaleStore, LocalizableArray,
    LocalizableCompound, LocalizableDate, LocalizableInt, LocalizableModel, LocalizableRef,
    LocalizableString, LocalizableSubstitutions, LocalizableValue, LocalizationStatus,
    PropertyNames, ResolutionPass, ResolvedModel, Substitutions, resolve, resolve_all,
};
use locbake::core::format::{DateFormat, DateStyle, IntFormat};
use locbake::error::ResolveError;

const EN_YAML: &str = r#"
en:
  Row:
    title: Row title
    label: "Value: %{value}"
  Report:
    heading: Quarterly report
    visitors: 1234567
    launched: "2024-03-05T14:07:09Z"
    tags: [alpha, beta, gamma]
    summary: "%{count} visitors since %{date}"
    broken: not a number
  Page:
    caption: Shared caption
en-GB:
  Report:
    heading: Quarterly report (UK)
"#;

const DE_YAML: &str = r#"
de:
  Row:
    title: Zeilentitel
    label: "Wert: %{value}"
  Report:
    heading: Quartalsbericht
    visitors: 1234567
"#;

fn load_store() -> Result<(TempDir, LocaleStore)> {
    let dir = TempDir::new()?;
    let locales = dir.path().join("locales");
    fs::create_dir_all(locales.join("de"))?;
    fs::write(locales.join("en.yml"), EN_YAML)?;
    fs::write(locales.join("de").join("report.yaml"), DE_YAML)?;
    let store = LocaleStore::load(&[locales])?;
    Ok((dir, store))
}

#[derive(Debug, Serialize, Deserialize)]
struct Row {
    value: i64,
    title: LocalizableString,
    label: BoundSubstitutions<Row>,
}

fn row_substitutions(row: &Row) -> Substitutions {
    Substitutions::from([(
        "value".to_string(),
        LocalizableInt::constant(row.value).into(),
    )])
}

impl Row {
    fn new(value: i64) -> Self {
        Self {
            value,
            title: LocalizableString::bound(),
            label: BoundSubstitutions::<Row>::bound(row_substitutions),
        }
    }
}

impl LocalizableModel for Row {
    fn property_names(&self) -> PropertyNames {
        PropertyNames::new()
            .bind(&self.title, "title")
            .bind(&self.label, "label")
    }

    fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
        Ok(Row {
            value: self.value,
            title: pass.resolve(&self.title)?,
            label: pass.resolve(&self.label)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Report {
    heading: LocalizableString,
    visitors: LocalizableInt,
    launched: LocalizableDate,
    tags: LocalizableArray,
    summary: LocalizableSubstitutions,
    byline: LocalizableCompound,
    rows: Vec<Row>,
    grid: Vec<Vec<Row>>,
    footer: Option<Row>,
}

impl Report {
    fn new() -> Self {
        let since = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        Self {
            heading: LocalizableString::bound(),
            visitors: LocalizableInt::from_ref(
                LocalizableRef::Bound(KeyBinding::new()),
                IntFormat::default(),
            ),
            launched: LocalizableDate::from_ref(
                LocalizableRef::Bound(KeyBinding::new()),
                DateFormat::styles(Some(DateStyle::Long), None),
            ),
            tags: LocalizableArray::bound(),
            summary: LocalizableSubstitutions::template(
                LocalizableString::bound(),
                [
                    (
                        "count",
                        LocalizableValue::from(LocalizableInt::localized(1500, IntFormat::default())),
                    ),
                    (
                        "date",
                        LocalizableValue::from(LocalizableDate::localized(
                            since,
                            DateFormat::pattern("%Y-%m-%d"),
                        )),
                    ),
                ],
            ),
            byline: LocalizableCompound::new(
                [
                    LocalizableValue::from(LocalizableString::localized(LocalizableRef::value(
                        "Report.heading",
                    ))),
                    LocalizableValue::from("Q1"),
                ],
                Some(LocalizableString::constant(" - ")),
            ),
            rows: vec![Row::new(1), Row::new(2)],
            grid: vec![vec![Row::new(3)], vec![Row::new(4), Row::new(5)]],
            footer: Some(Row::new(6)),
        }
    }
}

impl LocalizableModel for Report {
    fn property_names(&self) -> PropertyNames {
        PropertyNames::new()
            .bind(&self.heading, "heading")
            .bind(&self.visitors, "visitors")
            .bind(&self.launched, "launched")
            .bind(&self.tags, "tags")
            .bind(&self.summary, "summary")
    }

    fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
        Ok(Report {
            heading: pass.resolve(&self.heading)?,
            visitors: pass.resolve(&self.visitors)?,
            launched: pass.resolve(&self.launched)?,
            tags: pass.resolve(&self.tags)?,
            summary: pass.resolve(&self.summary)?,
            byline: pass.resolve(&self.byline)?,
            rows: pass.each("rows", &self.rows)?,
            grid: pass.each_nested("grid", &self.grid)?,
            footer: pass.optional("footer", &self.footer)?,
        })
    }
}

fn labels(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|row| row.label.text().unwrap()).collect()
}

#[test]
fn test_resolves_every_field_kind() -> Result<()> {
    let (_dir, store) = load_store()?;

    let resolved = resolve(&Report::new(), "en-US", &store)?;
    let report = resolved.model();

    assert_eq!(report.heading.text()?, "Quarterly report");
    assert_eq!(report.visitors.text()?, "1,234,567");
    assert_eq!(report.launched.text()?, "March 5, 2024");
    assert_eq!(report.tags.texts()?, vec!["alpha", "beta", "gamma"]);
    assert_eq!(report.summary.text()?, "1,500 visitors since 2024-03-05");
    assert_eq!(report.byline.text()?, "Quarterly report - Q1");
    assert_eq!(report.rows[0].title.text()?, "Row title");
    Ok(())
}

#[test]
fn test_sibling_instances_keep_their_own_substitutions() -> Result<()> {
    let (_dir, store) = load_store()?;

    let report = resolve(&Report::new(), "en", &store)?.into_inner();

    assert_eq!(labels(&report.rows), vec!["Value: 1", "Value: 2"]);
    assert_eq!(labels(&report.grid[0]), vec!["Value: 3"]);
    assert_eq!(labels(&report.grid[1]), vec!["Value: 4", "Value: 5"]);
    assert_eq!(report.footer.unwrap().label.text()?, "Value: 6");
    Ok(())
}

#[test]
fn test_region_falls_back_per_key() -> Result<()> {
    let (_dir, store) = load_store()?;

    let report = resolve(&Report::new(), "en-GB", &store)?.into_inner();

    assert_eq!(report.heading.text()?, "Quarterly report (UK)");
    assert_eq!(report.byline.text()?, "Quarterly report (UK) - Q1");
    assert_eq!(report.visitors.text()?, "1,234,567");
    assert_eq!(report.rows[1].title.text()?, "Row title");
    Ok(())
}

#[test]
fn test_missing_keys_resolve_to_empty_values() -> Result<()> {
    let (_dir, store) = load_store()?;

    let report = resolve(&Report::new(), "de-DE", &store)?.into_inner();

    assert_eq!(report.heading.text()?, "Quartalsbericht");
    assert_eq!(report.visitors.text()?, "1.234.567");
    assert_eq!(report.launched.text()?, "");
    assert!(report.tags.texts()?.is_empty());
    assert_eq!(report.summary.text()?, "");
    assert_eq!(labels(&report.rows), vec!["Wert: 1", "Wert: 2"]);
    Ok(())
}

#[test]
fn test_resolved_json_decodes_into_constants() -> Result<()> {
    let (_dir, store) = load_store()?;

    let resolved = resolve(&Report::new(), "en-US", &store)?;
    let json: serde_json::Value = serde_json::from_str(&resolved.to_json()?)?;
    assert_eq!(json["heading"], "Quarterly report");
    assert_eq!(json["visitors"], "1,234,567");
    assert_eq!(json["rows"][1]["label"], "Value: 2");
    assert_eq!(
        json["tags"][0],
        serde_json::json!({"kind": "string", "value": "alpha"})
    );

    let decoded = ResolvedModel::<Report>::decode("en-US", &resolved.to_bytes()?)?;
    let report = decoded.model();
    assert_eq!(report.summary, resolved.model().summary);
    assert_eq!(report.grid[1][1].label.text()?, "Value: 5");
    assert_eq!(
        report.tags.localization_status(),
        LocalizationStatus::Localized
    );
    assert_eq!(decoded.to_json()?, resolved.to_json()?);
    Ok(())
}

#[test]
fn test_resolution_is_deterministic() -> Result<()> {
    let (_dir, store) = load_store()?;
    let report = Report::new();

    let first = resolve(&report, "en-US", &store)?.to_json_pretty()?;
    let second = resolve(&report, "en-US", &store)?.to_json_pretty()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_constants_resolve_to_themselves() -> Result<()> {
    let (_dir, store) = load_store()?;
    let row = Row {
        value: 9,
        title: LocalizableString::constant("Fixed"),
        label: BoundSubstitutions::Constant("Already baked".to_string()),
    };

    let resolved = resolve(&row, "de", &store)?.into_inner();
    assert_eq!(resolved.title.text()?, "Fixed");
    assert_eq!(resolved.label.text()?, "Already baked");

    let pass = ResolutionPass::new("de", &store);
    let constants = [
        LocalizableValue::from(LocalizableString::constant("Fixed")),
        LocalizableInt::constant(1234567).into(),
        LocalizableDate::constant("5 March 2024").into(),
        LocalizableArray::constant(["alpha", "beta"]).into(),
        LocalizableCompound::constant("Quarterly report - Q1").into(),
        LocalizableSubstitutions::constant("x %{y}").into(),
    ];
    for constant in &constants {
        let resolved = pass.resolve(constant)?;
        assert_eq!(resolved.text()?, constant.text()?);
        assert_eq!(resolved.id(), constant.id());
        assert_eq!(resolved.localization_status(), LocalizationStatus::Localized);
    }
    assert_eq!(pass.resolve(&constants[1])?.text()?, "1234567");
    assert_eq!(pass.resolve(&constants[5])?.text()?, "x %{y}");
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    name: String,
    rank: i64,
    caption: BoundCompound<Entry>,
}

fn entry_pieces(entry: &Entry) -> Vec<LocalizableValue> {
    vec![
        LocalizableValue::from(entry.name.as_str()),
        LocalizableInt::localized(entry.rank, IntFormat::default()).into(),
    ]
}

impl Entry {
    fn new(name: &str, rank: i64) -> Self {
        Self {
            name: name.to_string(),
            rank,
            caption: BoundCompound::<Entry>::new(
                entry_pieces,
                Some(LocalizableString::constant(" #")),
            ),
        }
    }
}

impl LocalizableModel for Entry {
    fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
        Ok(Entry {
            name: self.name.clone(),
            rank: self.rank,
            caption: pass.resolve(&self.caption)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Listing {
    entries: Vec<Entry>,
}

impl LocalizableModel for Listing {
    fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
        Ok(Listing {
            entries: pass.each("entries", &self.entries)?,
        })
    }
}

#[test]
fn test_sibling_instances_join_their_own_pieces() -> Result<()> {
    let (_dir, store) = load_store()?;
    let listing = Listing {
        entries: vec![Entry::new("Ada", 1000), Entry::new("Grace", 2)],
    };

    let captions = |locale: &str| -> Result<Vec<String>> {
        let resolved = resolve(&listing, locale, &store)?.into_inner();
        Ok(resolved
            .entries
            .iter()
            .map(|entry| entry.caption.text())
            .collect::<Result<Vec<_>, _>>()?)
    };
    assert_eq!(captions("en")?, vec!["Ada #1,000", "Grace #2"]);
    assert_eq!(captions("de")?, vec!["Ada #1.000", "Grace #2"]);

    let json = resolve(&listing, "en", &store)?.to_json()?;
    let decoded = ResolvedModel::<Listing>::decode("en", json.as_bytes())?.into_inner();
    assert_eq!(decoded.entries[1].caption.text()?, "Grace #2");
    Ok(())
}

#[test]
fn test_bound_compound_needs_its_owner() -> Result<()> {
    let (_dir, store) = load_store()?;
    let entry = Entry::new("Ada", 1);

    let pass = ResolutionPass::new("en", &store);
    let err = pass.resolve(&entry.caption).unwrap_err();
    assert!(matches!(err, ResolveError::ModelNotFound { .. }));
    Ok(())
}

#[test]
fn test_decode_failure_is_reported() {
    let err = ResolvedModel::<Row>::decode("en", b"{not json").unwrap_err();
    assert!(matches!(err, ResolveError::Serialize(_)));
    assert!(err.to_string().contains("decode"));
}

#[test]
fn test_pending_model_refuses_to_serialize() {
    let err = serde_json::to_string(&Report::new()).unwrap_err();
    assert!(err.to_string().contains("is not yet resolved"));
}

#[test]
fn test_failed_field_aborts_the_pass() -> Result<()> {
    #[derive(Debug)]
    struct Stats {
        heading: LocalizableString,
        broken: LocalizableInt,
    }

    impl LocalizableModel for Stats {
        fn type_name() -> &'static str {
            "Report"
        }

        fn property_names(&self) -> PropertyNames {
            PropertyNames::new()
                .bind(&self.heading, "heading")
                .bind(&self.broken, "broken")
        }

        fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
            Ok(Stats {
                heading: pass.resolve(&self.heading)?,
                broken: pass.resolve(&self.broken)?,
            })
        }
    }

    let (_dir, store) = load_store()?;
    let stats = Stats {
        heading: LocalizableString::bound(),
        broken: LocalizableInt::from_ref(
            LocalizableRef::Bound(KeyBinding::new()),
            IntFormat::default(),
        ),
    };

    let err = resolve(&stats, "en", &store).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::UnknownLocalizationType { ref key, expected: "int", found: "string" }
            if key.as_str() == "Report.broken"
    ));
    // the input is untouched and still pending
    assert_eq!(stats.heading.localization_status(), LocalizationStatus::Pending);
    Ok(())
}

#[test]
fn test_missing_property_name_is_reported() -> Result<()> {
    struct Forgetful {
        title: LocalizableString,
    }

    impl LocalizableModel for Forgetful {
        fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
            Ok(Forgetful {
                title: pass.resolve(&self.title)?,
            })
        }
    }

    let (_dir, store) = load_store()?;
    let model = Forgetful {
        title: LocalizableString::bound(),
    };

    let err = resolve(&model, "en", &store).err().unwrap();
    assert!(matches!(err, ResolveError::UnboundProperty { .. }));
    assert!(err.is_internal());
    Ok(())
}

#[test]
fn test_unresolved_access_fails() {
    let pending = LocalizableString::localized(LocalizableRef::value("Report.heading"));
    assert!(matches!(
        pending.resolved_value(),
        Err(ResolveError::Unbound { .. })
    ));
    assert!(pending.is_empty());
}

#[test]
fn test_concurrent_passes_do_not_share_bindings() -> Result<()> {
    let (_dir, store) = load_store()?;
    let report = Report::new();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (locale, expected) = if i % 2 == 0 {
                    ("en", "Value: 2")
                } else {
                    ("de", "Wert: 2")
                };
                let store = &store;
                let report = &report;
                scope.spawn(move || {
                    for _ in 0..20 {
                        let resolved = resolve(report, locale, store).unwrap().into_inner();
                        assert_eq!(resolved.rows[1].label.text().unwrap(), expected);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
    Ok(())
}

#[test]
fn test_resolve_all_locales() -> Result<()> {
    let (_dir, store) = load_store()?;

    let resolved = resolve_all(&Report::new(), &["en-US", "en-GB", "de"], &store)?;
    let headings: Vec<String> = resolved
        .iter()
        .map(|r| r.model().heading.text().unwrap())
        .collect();
    assert_eq!(
        headings,
        vec!["Quarterly report", "Quarterly report (UK)", "Quartalsbericht"]
    );
    assert_eq!(resolved[2].locale(), "de");
    Ok(())
}

#[test]
fn test_generic_instantiations_share_keys() -> Result<()> {
    struct Article;
    struct Comment;

    struct Page<T: 'static> {
        caption: LocalizableString,
        _kind: PhantomData<T>,
    }

    impl<T: 'static> Page<T> {
        fn new() -> Self {
            Self {
                caption: LocalizableString::bound(),
                _kind: PhantomData,
            }
        }
    }

    impl<T: 'static> LocalizableModel for Page<T> {
        fn property_names(&self) -> PropertyNames {
            PropertyNames::new().bind(&self.caption, "caption")
        }

        fn localize<'a>(&'a self, pass: &mut ResolutionPass<'a>) -> Result<Self, ResolveError> {
            Ok(Page {
                caption: pass.resolve(&self.caption)?,
                _kind: PhantomData,
            })
        }
    }

    let (_dir, store) = load_store()?;
    let articles = resolve(&Page::<Article>::new(), "en", &store)?.into_inner();
    let comments = resolve(&Page::<Comment>::new(), "en", &store)?.into_inner();
    assert_eq!(articles.caption.text()?, "Shared caption");
    assert_eq!(comments.caption.text()?, "Shared caption");
    Ok(())
}

#[test]
fn test_int_grouping_and_date_pattern_precedence() -> Result<()> {
    let store = LocaleStore::from_yaml_str("en: {}")?;
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

    let pass = ResolutionPass::new("en-US", &store);
    let grouped = pass.resolve(&LocalizableInt::localized(1234567, IntFormat::grouped(3)))?;
    assert_eq!(grouped.text()?, "1,234,567");

    let plain = pass.resolve(&LocalizableInt::localized(1234567, IntFormat::plain()))?;
    assert_eq!(plain.text()?, "1234567");

    let date = LocalizableDate::localized(
        at,
        DateFormat::styles(Some(DateStyle::Full), Some(DateStyle::Short)).with_pattern("%d.%m.%Y"),
    );
    assert_eq!(pass.resolve(&date)?.text()?, "05.03.2024");

    let blank = LocalizableDate::localized(at, DateFormat::default());
    assert_eq!(pass.resolve(&blank)?.text()?, "");
    Ok(())
}

#[test]
fn test_resolved_row_json() -> Result<()> {
    let (_dir, store) = load_store()?;

    let resolved = resolve(&Row::new(1), "de", &store)?;
    insta::assert_snapshot!(resolved.to_json()?, @r#"{"value":1,"title":"Zeilentitel","label":"Wert: 1"}"#);
    Ok(())
}
