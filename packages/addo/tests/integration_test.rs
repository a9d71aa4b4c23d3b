//! End-to-end tests for destination assembly and rendering.
//!
//! Uses the fixture documents in `tests/fixtures/`.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use addo::render::{HtmlRenderer, Renderer, YamlRenderer};
use addo::{DestinationParser, Taxonomies, TreeValue};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

#[test]
fn test_taxonomy_fixture() {
    let taxonomies = Taxonomies::parse(&load_fixture("taxonomy.xml")).unwrap();

    assert_eq!(taxonomies.len(), 4);
    assert_eq!(taxonomies.sets().len(), 1);
    assert_eq!(
        taxonomies.children_of("africa").unwrap(),
        &["south_africa".to_string(), "kenya".to_string()]
    );
    assert_eq!(
        taxonomies.parents_of("cape_town").unwrap(),
        &["africa".to_string(), "south_africa".to_string()]
    );

    let cape_town = taxonomies.get("cape_town").unwrap();
    assert_eq!(cape_town.property("ethyl_content_object_id"), Some(None));
    assert_eq!(cape_town.property("geo_id"), Some(Some(5)));
}

#[test]
fn test_pipeline_destinations() {
    let source = load_fixture("destinations.xml");
    let taxonomy = load_fixture("taxonomy.xml");
    let parser = DestinationParser::new(&source, Some(&taxonomy)).unwrap();

    // The untitled destination is skipped
    let names: Vec<String> = parser
        .destinations()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, vec!["africa", "south_africa", "cape_town"]);
    assert_eq!(parser.metadata().len(), 3);
}

#[test]
fn test_pipeline_relations() {
    let source = load_fixture("destinations.xml");
    let taxonomy = load_fixture("taxonomy.xml");
    let parser = DestinationParser::new(&source, Some(&taxonomy)).unwrap();
    let destinations: Vec<_> = parser.destinations().collect();

    let africa = &destinations[0];
    // Kenya is in the taxonomy but has no destination: counted, not resolved
    assert_eq!(africa.number_of_children(), 2);
    let children: Vec<_> = africa.children().map(|c| c.name.as_str()).collect();
    assert_eq!(children, vec!["south_africa"]);
    assert_eq!(africa.parents().count(), 0);

    let cape_town = &destinations[2];
    let parents: Vec<_> = cape_town.parents().map(|p| p.title.as_str()).collect();
    assert_eq!(parents, vec!["Africa", "South Africa"]);
    assert_eq!(cape_town.asset_id(), Some("3-1"));
    assert_eq!(cape_town.atlas_id(), Some(111444));
}

#[test]
fn test_pipeline_cleanup() {
    let source = load_fixture("destinations.xml");
    let parser = DestinationParser::new(&source, None).unwrap();
    let destinations: Vec<_> = parser.destinations().collect();

    let africa = &destinations[0];
    assert!(africa.get_content(&["introductory"]).is_none());
    assert!(africa
        .get_text(&["introduction"])
        .unwrap()
        .starts_with("Africa is the world's second-largest continent."));

    let south_africa = &destinations[1];
    assert_eq!(
        south_africa.get_content(&["history", "history"]),
        Some(&TreeValue::List(vec![
            "Some History 1".into(),
            "Some History 2".into()
        ]))
    );
    assert_eq!(
        south_africa.get_text(&[
            "practical_information",
            "health_and_safety",
            "dangers_and_annoyances"
        ]),
        Some("Keep an eye on your belongings.")
    );
}

#[test]
fn test_render_html_fixture() {
    let source = load_fixture("destinations.xml");
    let taxonomy = load_fixture("taxonomy.xml");
    let parser = DestinationParser::new(&source, Some(&taxonomy)).unwrap();
    let renderer = HtmlRenderer::new();

    let africa = parser.destinations().next().unwrap();
    let page = renderer.render(&africa).unwrap();

    assert!(page.contains("<title>Africa</title>"));
    assert!(page.contains("<a href=\"south_africa.html\">South Africa</a>"));
    assert!(page.contains("<p>Africa is the world's second-largest continent.</p>"));
    assert!(page.contains("<p><b>It is home to 54 countries.</b></p>"));
}

#[test]
fn test_render_yaml_fixture() {
    let source = load_fixture("destinations.xml");
    let taxonomy = load_fixture("taxonomy.xml");
    let parser = DestinationParser::new(&source, Some(&taxonomy)).unwrap();

    let cape_town = parser.destinations().last().unwrap();
    let yaml = YamlRenderer.render(&cape_town).unwrap();
    let parsed: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();

    assert_eq!(parsed["title"].as_str(), Some("Cape Town"));
    assert_eq!(parsed["content"]["weather"].as_str(), Some("Mediterranean"));
    assert_eq!(parsed["parents"][1]["name"].as_str(), Some("south_africa"));
}
