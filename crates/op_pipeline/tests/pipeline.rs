use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use op_core::testing::MockElement;
use op_core::{LanguageCode, ProviderError, Translator};
use op_pipeline::prelude::*;

/// Echoes its input and counts how often it is asked.
#[derive(Default)]
struct CountingEcho {
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingEcho {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for CountingEcho {
    fn name(&self) -> &str {
        "counting-echo"
    }

    async fn translate(
        &self,
        text: &str,
        _from: &LanguageCode,
        _to: &LanguageCode,
    ) -> std::result::Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(text.to_string())
    }
}

/// Knows a few headlines, fails on anything else.
struct Dictionary;

#[async_trait]
impl Translator for Dictionary {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn translate(
        &self,
        text: &str,
        _from: &LanguageCode,
        _to: &LanguageCode,
    ) -> std::result::Result<String, ProviderError> {
        match text {
            "El cambio climático" => Ok("Climate change".to_string()),
            "La crisis climática" => Ok("The climate crisis".to_string()),
            "Cambio de rumbo" => Ok("Change of course".to_string()),
            _ => Err(ProviderError::Api("unknown text".to_string())),
        }
    }
}

/// Hangs on one title and answers every other one at once.
struct StallsOn(&'static str);

#[async_trait]
impl Translator for StallsOn {
    fn name(&self) -> &str {
        "stalls-on"
    }

    async fn translate(
        &self,
        text: &str,
        _from: &LanguageCode,
        _to: &LanguageCode,
    ) -> std::result::Result<String, ProviderError> {
        if text == self.0 {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(text.to_uppercase())
    }
}

fn opinion_article(title: &str) -> MockElement {
    MockElement::new()
        .with_child("h2.c_t, h2[class*='c_t']", MockElement::new().with_text(title))
        .with_child("p.c_d, p[class*='c_d']", MockElement::new().with_text("Contenido"))
        .with_child(
            "img.c_m_e, img[class*='c_m_e']",
            MockElement::new().with_attribute("srcset", "//img/a.jpg 300w, //img/b.jpg 600w"),
        )
}

fn pipeline_with(translator: Arc<dyn Translator>) -> Pipeline {
    Pipeline::new(
        ContentExtractor::new(ExtractionProfile::opinion()),
        Arc::new(TranslationCache::new(translator)),
        PipelineConfig::default(),
    )
}

#[tokio::test]
async fn test_end_to_end_with_shared_cache() {
    let elements = vec![
        opinion_article("Primer titular").boxed(),
        MockElement::new()
            .with_child("p.c_d, p[class*='c_d']", MockElement::new().with_text("Sin título"))
            .boxed(),
        opinion_article("Segundo titular").boxed(),
    ];

    let translator = Arc::new(CountingEcho::default());
    let pipeline = pipeline_with(translator.clone());
    let cancel = CancellationToken::new();

    let extracted = pipeline_with(translator.clone()).run(&elements, 5, &cancel).await;
    assert_eq!(translator.calls(), 2);
    let titles: Vec<_> = extracted.records.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Primer titular", "Segundo titular"]);
    assert_eq!(extracted.records[0].image_url(), "https://img/a.jpg");
    assert_eq!(extracted.records[0].content(), "Contenido");

    let calls_before = translator.calls();
    let first = pipeline.run(&elements, 5, &cancel).await;
    assert_eq!(translator.calls() - calls_before, first.records.len());
    assert_eq!(first.cache_stats.hits, 0);

    let second = pipeline.run(&elements, 5, &cancel).await;
    assert_eq!(translator.calls() - calls_before, first.records.len());
    assert_eq!(second.cache_stats.hits as usize, second.records.len());

    for record in &second.records {
        assert_eq!(record.translated_title(), Some(record.title()));
    }
    assert_eq!(second.stats.unique_words, 3);
    assert_eq!(second.stats.max_frequency, 2);
    assert_eq!(second.top_words[0].word, "titular");
}

#[tokio::test]
async fn test_count_limits_examined_candidates() {
    let elements = vec![
        opinion_article("Uno").boxed(),
        opinion_article("Dos").boxed(),
        opinion_article("Tres").boxed(),
    ];
    let pipeline = pipeline_with(Arc::new(CountingEcho::default()));

    let report = pipeline.run(&elements, 2, &CancellationToken::new()).await;
    let (records, _stats) = report.into_parts();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].title(), "Dos");

    let report = pipeline.run(&elements, 0, &CancellationToken::new()).await;
    assert!(report.records.is_empty());
    assert_eq!(report.stats.unique_words, 0);
    assert_eq!(report.stats.average_frequency, 0.0);
}

#[tokio::test]
async fn test_failed_translations_fall_back_to_titles() {
    let elements = vec![
        opinion_article("El cambio climático").boxed(),
        opinion_article("Titular desconocido").boxed(),
        opinion_article("La crisis climática").boxed(),
        opinion_article("Cambio de rumbo").boxed(),
    ];
    let pipeline = pipeline_with(Arc::new(Dictionary));

    let report = pipeline.run(&elements, 5, &CancellationToken::new()).await;

    let translated: Vec<_> = report.records.iter().map(|r| r.translated_title().unwrap()).collect();
    assert_eq!(
        translated,
        vec!["Climate change", "Titular desconocido", "The climate crisis", "Change of course"]
    );
    assert_eq!(report.cache_stats.failures, 1);
    assert_eq!(report.cache_stats.entries, 3);
    assert_eq!(report.top_words[0].word, "change");
    assert_eq!(report.top_words[0].count, 2);
    assert_eq!(report.top_words[1].word, "climate");
    assert!(report.repeated_words.is_empty());
}

#[tokio::test]
async fn test_run_document_parses_html() {
    let html = r#"
        <main>
            <article class="story">
                <h2><a href="/opinion/1.html">La crisis climática</a></h2>
                <img src="//imagenes/1.jpg">
            </article>
            <article class="story">
                <h2><a href="/opinion/2.html">Cambio de rumbo</a></h2>
            </article>
        </main>
    "#;
    let document = HtmlDocument::parse(html);
    let pipeline = pipeline_with(Arc::new(Dictionary));

    let report = pipeline
        .run_document(&document, 5, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].article_url(), "/opinion/1.html");
    assert_eq!(report.records[0].image_url(), "https://imagenes/1.jpg");
    assert_eq!(report.records[1].translated_title(), Some("Change of course"));
}

#[tokio::test]
async fn test_run_document_without_articles() {
    let document = HtmlDocument::parse("<main><p>Nada</p></main>");
    let pipeline = pipeline_with(Arc::new(Dictionary));

    let result = pipeline.run_document(&document, 5, &CancellationToken::new()).await;
    assert!(matches!(result, Err(Error::ExtractionEmpty { .. })));
}

#[tokio::test]
async fn test_cancellation_before_any_translation_finishes() {
    let elements = vec![
        opinion_article("Uno").boxed(),
        opinion_article("Dos").boxed(),
    ];
    let translator = Arc::new(CountingEcho {
        calls: AtomicUsize::new(0),
        delay: Some(Duration::from_secs(30)),
    });
    let pipeline = pipeline_with(translator);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let report = pipeline.run(&elements, 5, &cancel).await;
    canceller.await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.translated_title().is_none()));
    assert_eq!(report.stats.unique_words, 2);
}

#[tokio::test]
async fn test_cancellation_keeps_translations_that_finished() {
    let elements = vec![
        opinion_article("Uno").boxed(),
        opinion_article("Dos").boxed(),
        opinion_article("Tres").boxed(),
    ];
    let pipeline = pipeline_with(Arc::new(StallsOn("Uno")));
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let report = pipeline.run(&elements, 5, &cancel).await;
    canceller.await.unwrap();

    assert!(report.cancelled);
    let translated: Vec<_> = report.records.iter().map(|r| r.translated_title()).collect();
    assert_eq!(translated, vec![None, Some("DOS"), Some("TRES")]);
    assert_eq!(report.cache_stats.entries, 2);
    assert_eq!(report.stats.unique_words, 3);
}

#[tokio::test]
async fn test_report_serializes() {
    let elements = vec![opinion_article("Primer titular").boxed()];
    let pipeline = pipeline_with(Arc::new(CountingEcho::default()));

    let report = pipeline.run(&elements, 5, &CancellationToken::new()).await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["records"][0]["title"], "Primer titular");
    assert_eq!(json["records"][0]["translated_title"], "Primer titular");
    assert_eq!(json["stats"]["unique_words"], 2);
    assert_eq!(json["cancelled"], false);
}
