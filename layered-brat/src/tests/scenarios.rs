use std::collections::{BTreeMap, HashSet};

use layered_annotation::{
    AnnotationFeature, AnnotationId, AnnotationLayer, AnnotationStore, Document, FeatureSchema,
    FeatureValue, LayerKind, LinkWithRole, Span,
};

use crate::{
    render_layer, Color, ColoringPolicy, Offsets, RenderError, RenderPreferences, RenderWarning,
    Renderer, ResponseDisplay, StaticColoring, Vid, WindowRequest,
};

fn span(begin: usize, end: usize) -> Span {
    Span { begin, end }
}

/// Sentence 1 = [0,13), sentence 2 = [14,28)
fn cat_document() -> Document {
    Document::new(
        "The cat sat.  It slept well.",
        vec![span(0, 13), span(14, 28)],
    )
    .unwrap()
}

fn entity_layer() -> AnnotationLayer {
    AnnotationLayer::new(1, "Entity", LayerKind::Span)
        .with_feature(AnnotationFeature::scalar("value"))
}

fn predicate_layer() -> AnnotationLayer {
    AnnotationLayer::new(2, "Predicate", LayerKind::Span)
        .with_feature(AnnotationFeature::scalar("sense"))
        .with_feature(AnnotationFeature::slot("arguments"))
}

fn schema() -> FeatureSchema {
    FeatureSchema::new(vec![entity_layer(), predicate_layer()]).unwrap()
}

fn value(value: &str) -> BTreeMap<String, FeatureValue> {
    let mut features = BTreeMap::new();
    features.insert("value".to_string(), FeatureValue::from(value));
    features
}

fn predicate(sense: &str, links: Vec<LinkWithRole>) -> BTreeMap<String, FeatureValue> {
    let mut features = BTreeMap::new();
    features.insert("sense".to_string(), FeatureValue::from(sense));
    features.insert("arguments".to_string(), FeatureValue::Links(links));
    features
}

fn grey() -> StaticColoring {
    StaticColoring(Color::new("#bebebe"))
}

#[test]
fn test_span_crossing_two_sentences_yields_two_fragments() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let id = store.add("Entity", span(10, 20), value("X")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    let entity = outcome.response.entity(Vid::new(id)).unwrap();
    assert_eq!(entity.offsets, vec![Offsets::new(10, 13), Offsets::new(14, 20)]);
    assert_eq!(entity.type_name, "1_Entity");
    assert_eq!(entity.label, "X");
}

#[test]
fn test_span_inside_one_sentence_yields_raw_offsets() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let id = store.add("Entity", span(2, 5), value("X")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    assert_eq!(
        outcome.response.entity(Vid::new(id)).unwrap().offsets,
        vec![Offsets::new(2, 5)]
    );
    assert_eq!(outcome.response.text, "The cat sat.  It slept well.");
    assert_eq!(
        outcome.response.sentence_offsets,
        vec![Offsets::new(0, 13), Offsets::new(14, 28)]
    );
}

#[test]
fn test_slot_links_become_relations_with_distinct_ids() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    let it = store.add("Entity", span(14, 16), value("ANIMAL")).unwrap();
    let sat = store
        .add(
            "Predicate",
            span(8, 11),
            predicate(
                "sit.01",
                vec![LinkWithRole::new("ARG0", cat), LinkWithRole::new("ARG1", it)],
            ),
        )
        .unwrap();
    let layer = predicate_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    let relations = &outcome.response.relations;
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[0].vid, Vid::slot(sat, 1, 0));
    assert_eq!(relations[0].label, "ARG0");
    assert_eq!(relations[0].argument("Arg2"), Some(Vid::new(cat)));
    assert_eq!(relations[1].vid, Vid::slot(sat, 1, 1));
    assert_eq!(relations[1].label, "ARG1");
    assert_eq!(relations[1].argument("Arg2"), Some(Vid::new(it)));
    assert!(!outcome.has_warnings());
}

#[test]
fn test_composite_ids_are_unique_across_owners() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    let it = store.add("Entity", span(14, 16), value("ANIMAL")).unwrap();
    store
        .add(
            "Predicate",
            span(8, 11),
            predicate("sit.01", vec![LinkWithRole::new("ARG0", cat)]),
        )
        .unwrap();
    store
        .add(
            "Predicate",
            span(17, 22),
            predicate(
                "sleep.01",
                vec![LinkWithRole::new("ARG0", it), LinkWithRole::new("ARG0", it)],
            ),
        )
        .unwrap();
    let layer = predicate_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    let vids: HashSet<Vid> = outcome.response.relations.iter().map(|r| r.vid).collect();
    assert_eq!(outcome.response.relations.len(), 3);
    assert_eq!(vids.len(), 3);
}

#[test]
fn test_dangling_link_is_skipped_and_reported() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    let it = store.add("Entity", span(14, 16), value("ANIMAL")).unwrap();
    let sat = store
        .add(
            "Predicate",
            span(8, 11),
            predicate(
                "sit.01",
                vec![LinkWithRole::new("ARG0", cat), LinkWithRole::new("ARG1", it)],
            ),
        )
        .unwrap();
    let slept = store
        .add(
            "Predicate",
            span(17, 22),
            predicate("sleep.01", vec![LinkWithRole::new("ARG0", it)]),
        )
        .unwrap();
    store.remove(cat);
    let layer = predicate_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    // both predicates still render, only the broken link is missing
    assert_eq!(outcome.response.entities.len(), 2);
    let vids: Vec<Vid> = outcome.response.relations.iter().map(|r| r.vid).collect();
    assert_eq!(vids, vec![Vid::slot(sat, 1, 1), Vid::slot(slept, 1, 0)]);
    assert_eq!(
        outcome.warnings,
        vec![RenderWarning::DanglingReference {
            owner: sat,
            target: cat,
            feature: Some(1),
            slot: Some(0),
        }]
    );
}

#[test]
fn test_unplaceable_span_aborts_render() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    store.add("Entity", span(2, 5), value("OK")).unwrap();
    // starts in the gap between the sentences
    let broken = store.add("Entity", span(13, 16), value("BAD")).unwrap();
    let layer = entity_layer();

    let result = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    );
    assert_eq!(
        result,
        Err(RenderError::SpanResolution {
            annotation: broken,
            span: span(13, 16),
        })
    );
}

#[test]
fn test_empty_span_inside_sentence_renders() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let id = store.add("Entity", span(5, 5), value("CARET")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    assert_eq!(
        outcome.response.entity(Vid::new(id)).unwrap().offsets,
        vec![Offsets::new(5, 5)]
    );
}

#[test]
fn test_empty_span_between_touching_sentences_renders() {
    let doc = Document::new("aaaaa.bbbbb.", vec![span(0, 6), span(6, 12)]).unwrap();
    let mut store = AnnotationStore::new();
    let id = store.add("Entity", span(6, 6), value("CARET")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();

    assert_eq!(outcome.response.entities.len(), 1);
    assert_eq!(
        outcome.response.entity(Vid::new(id)).unwrap().offsets,
        vec![Offsets::new(6, 6)]
    );
}

#[test]
fn test_empty_span_in_sentence_gap_aborts_render() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let id = store.add("Entity", span(13, 13), value("CARET")).unwrap();
    let layer = entity_layer();

    let result = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    );
    assert_eq!(
        result,
        Err(RenderError::SpanResolution {
            annotation: id,
            span: span(13, 13),
        })
    );
}

#[test]
fn test_window_offsets_are_relative_and_spans_clipped() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    store.add("Entity", span(2, 5), value("OUTSIDE")).unwrap();
    let crossing = store.add("Entity", span(10, 20), value("CROSSING")).unwrap();
    let inside = store.add("Entity", span(17, 22), value("INSIDE")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(14, 1),
        &grey(),
    )
    .unwrap();

    let response = &outcome.response;
    assert_eq!(response.text, "It slept well.");
    assert_eq!(response.sentence_offsets, vec![Offsets::new(0, 14)]);
    assert_eq!(response.entities.len(), 2);
    assert_eq!(
        response.entity(Vid::new(crossing)).unwrap().offsets,
        vec![Offsets::new(0, 6)]
    );
    assert_eq!(
        response.entity(Vid::new(inside)).unwrap().offsets,
        vec![Offsets::new(3, 8)]
    );
}

#[test]
fn test_invalid_window_fails_before_annotations_are_read() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    store.add("Entity", span(13, 16), value("BAD")).unwrap();
    let layer = entity_layer();

    let result = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 0),
        &grey(),
    );
    assert!(matches!(result, Err(RenderError::InvalidWindow { .. })));

    let result = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(13, 1),
        &grey(),
    );
    assert_eq!(result, Err(RenderError::SentenceNotFound { offset: 13 }));
}

#[test]
fn test_renderer_rejects_unknown_type() {
    let doc = cat_document();
    let store = AnnotationStore::new();
    let schema = schema();
    let preferences = RenderPreferences::default();
    let renderer = Renderer::new(&schema, &preferences);

    let result = renderer.render(&doc, &store, &renderer.request_at(0), &["Entity", "Pos"]);
    assert_eq!(result, Err(RenderError::UnknownType("Pos".to_string())));
}

#[test]
fn test_renderer_uses_layer_policies() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    let sat = store
        .add(
            "Predicate",
            span(8, 11),
            predicate("sit.01", vec![LinkWithRole::new("ARG0", cat)]),
        )
        .unwrap();
    let schema = schema();
    let preferences = RenderPreferences::default()
        .with_window_size(2)
        .with_layer_policy(
            "Predicate",
            ColoringPolicy::Static {
                color: Color::new("#fb8072"),
            },
        );
    let renderer = Renderer::new(&schema, &preferences);

    let outcome = renderer
        .render(&doc, &store, &renderer.request_at(0), &["Entity", "Predicate"])
        .unwrap();

    let response = &outcome.response;
    assert_eq!(response.entity(Vid::new(sat)).unwrap().color, Color::new("#fb8072"));
    assert_eq!(
        response.relation(Vid::slot(sat, 1, 0)).unwrap().color,
        Color::new("#fb8072")
    );
    // Entity falls back to the default label-hash policy
    let entity_color = &response.entity(Vid::new(cat)).unwrap().color;
    assert!(crate::PALETTE_PASTEL.contains(&entity_color.as_str()));
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    store
        .add(
            "Predicate",
            span(8, 20),
            predicate("sit.01", vec![LinkWithRole::new("ARG0", cat)]),
        )
        .unwrap();
    let schema = schema();
    let preferences = RenderPreferences::default();
    let renderer = Renderer::new(&schema, &preferences);
    let request = renderer.request_at(0);

    let first = renderer
        .render(&doc, &store, &request, &["Entity", "Predicate"])
        .unwrap();
    let second = renderer
        .render(&doc, &store, &request, &["Entity", "Predicate"])
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_renders_share_read_only_inputs() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    store.add("Entity", span(14, 16), value("ANIMAL")).unwrap();
    let schema = schema();
    let preferences = RenderPreferences::default();

    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = [0usize, 14]
            .iter()
            .map(|&anchor| {
                let (doc, store, schema, preferences) = (&doc, &store, &schema, &preferences);
                scope.spawn(move || {
                    let renderer = Renderer::new(schema, preferences);
                    renderer.render(doc, store, &WindowRequest::new(anchor, 1), &["Entity"])
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].as_ref().unwrap().response.entities.len(), 1);
    assert_eq!(
        outcomes[1].as_ref().unwrap().response.entities[0].vid,
        Vid::new(AnnotationId(1))
    );
}

#[test]
fn test_response_display() {
    let doc = Document::from_text("The cat sat. It slept well.");
    let mut store = AnnotationStore::new();
    let cat = store.add("Entity", span(4, 7), value("ANIMAL")).unwrap();
    store.add("Entity", span(13, 15), value("ANIMAL")).unwrap();
    store
        .add(
            "Predicate",
            span(8, 11),
            predicate("sit.01", vec![LinkWithRole::new("ARG0", cat)]),
        )
        .unwrap();
    let schema = schema();
    let preferences = RenderPreferences::default();
    let renderer = Renderer::new(&schema, &preferences);

    let outcome = renderer
        .render(&doc, &store, &renderer.request_at(0), &["Entity", "Predicate"])
        .unwrap();
    let display = ResponseDisplay::new(&outcome.response).to_string();

    insta::assert_snapshot!(display, @r###"
    The cat sat.
        ╰─╯[A] 1_Entity(ANIMAL)
            ╰─╯2_Predicate(sit.01)
              └─ARG0─>[A]
    It slept well.
    ╰╯1_Entity(ANIMAL)
    "###);
}

#[test]
fn test_response_display_multi_sentence_entity() {
    let doc = cat_document();
    let mut store = AnnotationStore::new();
    store.add("Entity", span(10, 20), value("X")).unwrap();
    let layer = entity_layer();

    let outcome = render_layer(
        &doc,
        &store,
        &layer,
        &layer.features,
        &WindowRequest::new(0, 2),
        &grey(),
    )
    .unwrap();
    let display = ResponseDisplay::new(&outcome.response).to_string();

    insta::assert_snapshot!(display, @r###"
    The cat sat.
              ╰─╯1_Entity(X)
    It slept well.
    ╰────╯1_Entity(X)
    "###);
}
