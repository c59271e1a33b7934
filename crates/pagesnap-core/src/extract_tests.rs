use super::*;
use crate::fake_driver::{FakeDriver, FakeNode};
use crate::meta::MetaAggregator;

fn page() -> FakeDriver {
    FakeDriver::new()
        .node(1, FakeNode::new("<img alt=\"logo\">").alt("logo").at(10.0, 10.0, 24.0, 24.0))
        .node(2, FakeNode::new("<img alt=\"hero\">").alt("hero").at(40.0, 5.0, 800.0, 400.0))
        .node(3, FakeNode::new("<h1>Welcome</h1>").text("Welcome").inner("Welcome"))
        .node(
            4,
            FakeNode::new("<a href=\"/about\">About</a>")
                .text("About")
                .href("https://example.com/about")
                .style("background", "rgb(0,0,0) none repeat")
                .style("color", "rgb(255, 255, 255)")
                .style("font-family", "Inter"),
        )
        .node(
            5,
            FakeNode::new("<button>Go</button>")
                .text("Go")
                .style("background", "rgb(0,0,0) none repeat")
                .style("font-family", "Inter"),
        )
        .node(6, FakeNode::new("<svg></svg>"))
        .matches("img, svg", &[1, 2, 6])
        .matches("img", &[1, 2])
        .matches("h1, h2, h3, h4, h5, h6", &[3])
        .matches("a", &[4])
        .matches(r#"button, input[type="button"], input[type="submit"]"#, &[5])
}

#[tokio::test]
async fn test_extract_all_categories() {
    let driver = page();
    let elements = extract(&CategorySelector::default(), &driver).await;

    assert_eq!(elements.get(Category::Headings)[0].title, "Welcome");
    assert_eq!(elements.get(Category::Links)[0].title, "About");
    assert_eq!(elements.get(Category::Buttons)[0].title, "Go");
    assert_eq!(elements.get(Category::Images).len(), 2);
    assert!(elements.get(Category::Videos).is_empty());
    assert!(elements.get(Category::Textfields).is_empty());
}

#[tokio::test]
async fn test_icons_thresholded_by_position() {
    let driver = page();
    let elements = extract(&CategorySelector::default(), &driver).await;

    // Only the image at (10, 10) qualifies; the one at (40, 5) and the
    // box-less svg do not.
    let icons = elements.get(Category::Icons);
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].title, "logo");
}

#[tokio::test]
async fn test_node_shared_between_categories() {
    let driver = page();
    let elements = extract(&CategorySelector::default(), &driver).await;

    let in_icons = &elements.get(Category::Icons)[0];
    let in_images = &elements.get(Category::Images)[0];
    assert_eq!(in_icons, in_images);
}

#[tokio::test]
async fn test_failing_query_leaves_category_empty() {
    let driver = page().failing("a");
    let elements = extract(&CategorySelector::default(), &driver).await;

    assert!(elements.get(Category::Links).is_empty());
    assert_eq!(elements.get(Category::Headings).len(), 1);
}

#[tokio::test]
async fn test_cancelled_extraction_is_empty() {
    let driver = page();
    let extractor = Extractor::new(
        CategorySelector::default(),
        StyleCompactor::default(),
        ExtractOptions::default(),
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    let elements = extractor.extract_with_cancel(&driver, cancel).await;
    assert!(elements.is_empty());
}

#[tokio::test]
async fn test_extract_node_directly() {
    let driver = page();
    let extractor = Extractor::new(
        CategorySelector::default(),
        StyleCompactor::default(),
        ExtractOptions::default(),
    );
    let record = extractor
        .extract_node(&driver, NodeHandle::new(3))
        .await
        .unwrap();
    assert_eq!(record.title, "Welcome");
}

#[tokio::test]
async fn test_palette_from_extraction() {
    let driver = page();
    let elements = extract(&CategorySelector::default(), &driver).await;
    let meta = MetaAggregator::aggregate(&elements);

    assert_eq!(meta.colors.bg.len(), 1);
    assert!(meta.colors.bg.contains("rgb(0,0,0)"));
    assert!(meta.colors.fg.contains("rgb(255, 255, 255)"));
    assert_eq!(meta.fonts.len(), 1);
}
