use textlens::{AnalysisRequest, Analyzer};

const TEXT: &str = "Stock markets rallied after the central bank held rates steady. \
    Investors moved money into technology companies and startup funds, \
    while analysts warned that the market could cool later in the year.";

#[tokio::test]
async fn repeated_analysis_is_identical() {
    let analyzer = Analyzer::offline();
    let request = AnalysisRequest::new(TEXT);

    let first = analyzer.analyze(&request).await.unwrap();
    for _ in 0..5 {
        assert_eq!(analyzer.analyze(&request).await.unwrap(), first);
    }
}

#[test]
fn separate_analyzers_agree() {
    let a = Analyzer::offline();
    let b = Analyzer::offline();
    assert_eq!(a.classify(TEXT), b.classify(TEXT));
    assert_eq!(
        a.extract_keywords(TEXT, 5).into_value(),
        b.extract_keywords(TEXT, 5).into_value()
    );
}

#[test]
fn classification_ignores_case() {
    let analyzer = Analyzer::offline();
    assert_eq!(analyzer.classify(TEXT), analyzer.classify(&TEXT.to_uppercase()));
}

#[tokio::test]
async fn concurrent_requests_share_one_analyzer() {
    let analyzer = std::sync::Arc::new(Analyzer::offline());
    let expected = analyzer.analyze(&AnalysisRequest::new(TEXT)).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let analyzer = analyzer.clone();
            tokio::spawn(async move { analyzer.analyze(&AnalysisRequest::new(TEXT)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), expected);
    }
}
