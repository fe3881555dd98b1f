use scraper::{ElementRef, Selector};

use crate::models::{ContentDetails, ContentInfo};

// base
pub trait DOMProcessor<T>: Sync + Send {
    fn process(&self, el: &ElementRef) -> T;
}

// models processor
pub struct ContentInfoProcessor {
    pub id: Box<dyn DOMProcessor<String>>,
    pub title: Box<dyn DOMProcessor<String>>,
    pub cover: Box<dyn DOMProcessor<String>>,
    pub genre: &'static str,
}

impl DOMProcessor<ContentInfo> for ContentInfoProcessor {
    fn process(&self, el: &ElementRef) -> ContentInfo {
        ContentInfo {
            id: self.id.process(el),
            title: self.title.process(el),
            cover: self.cover.process(el),
            genre: self.genre.into(),
        }
    }
}

impl ContentInfoProcessor {
    pub fn boxed(self) -> Box<dyn DOMProcessor<ContentInfo>> {
        Box::new(self)
    }
}

pub struct ContentDetailsProcessor {
    pub title: Box<dyn DOMProcessor<String>>,
    pub description: Box<dyn DOMProcessor<String>>,
    pub cover: Box<dyn DOMProcessor<String>>,
    pub genre: &'static str,
    pub total_episodes: u32,
}

impl DOMProcessor<ContentDetails> for ContentDetailsProcessor {
    fn process(&self, el: &ElementRef) -> ContentDetails {
        ContentDetails {
            title: self.title.process(el),
            description: self.description.process(el),
            cover: self.cover.process(el),
            genre: self.genre.into(),
            total_episodes: self.total_episodes,
        }
    }
}

// text nodes
#[derive(Default)]
pub struct TextValue {
    pub all_nodes: bool,
}

impl DOMProcessor<String> for TextValue {
    fn process(&self, el: &ElementRef) -> String {
        if self.all_nodes {
            el.text().collect::<Vec<_>>().join("").trim().into()
        } else {
            el.text().next().unwrap_or_default().trim().into()
        }
    }
}

impl TextValue {
    pub fn new() -> TextValue {
        TextValue { all_nodes: false }
    }

    pub fn all_nodes(mut self) -> Self {
        self.all_nodes = true;
        self
    }

    pub fn in_scope(self, selectors: &str) -> ScopeProcessor<String> {
        ScopeProcessor::new(selectors, self.boxed())
    }

    pub fn boxed(self) -> Box<dyn DOMProcessor<String>> {
        Box::new(self)
    }
}

pub fn text_value(selectors: &str) -> Box<dyn DOMProcessor<String>> {
    TextValue::new()
        .all_nodes()
        .in_scope(selectors)
        .unwrap_or_default()
        .boxed()
}

pub fn text_value_or(selectors: &str, default: &'static str) -> Box<dyn DOMProcessor<String>> {
    TextValue::new()
        .all_nodes()
        .in_scope(selectors)
        .map(move |opt| opt.unwrap_or_else(|| default.to_owned()))
        .boxed()
}

pub struct AttrValue {
    pub attr: &'static str,
}

impl DOMProcessor<Option<String>> for AttrValue {
    fn process(&self, el: &ElementRef) -> Option<String> {
        el.attr(self.attr).map(|s| s.trim().into())
    }
}

impl AttrValue {
    pub fn new(attr: &'static str) -> AttrValue {
        AttrValue { attr }
    }

    pub fn in_scope(self, selectors: &str) -> ScopeProcessor<Option<String>> {
        ScopeProcessor::new(selectors, self.boxed())
    }

    pub fn boxed(self) -> Box<dyn DOMProcessor<Option<String>>> {
        Box::new(self)
    }
}

pub fn attr_value(selectors: &str, attr: &'static str) -> Box<dyn DOMProcessor<String>> {
    AttrValue::new(attr)
        .in_scope(selectors)
        .map(|opt| opt.flatten().unwrap_or_default())
        .boxed()
}

pub fn attr_value_map<Map>(
    selectors: &str,
    attr: &'static str,
    map: Map,
) -> Box<dyn DOMProcessor<String>>
where
    Map: Fn(String) -> String + 'static + Sync + Send,
{
    AttrValue::new(attr)
        .in_scope(selectors)
        .map(move |opt| opt.flatten().map(&map).unwrap_or_default())
        .boxed()
}

/// First non-empty result of the given processors, tried in order.
pub struct FirstNonEmpty {
    pub processors: Vec<Box<dyn DOMProcessor<String>>>,
}

impl DOMProcessor<String> for FirstNonEmpty {
    fn process(&self, el: &ElementRef) -> String {
        self.processors
            .iter()
            .map(|p| p.process(el))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}

pub fn first_non_empty(processors: Vec<Box<dyn DOMProcessor<String>>>) -> Box<dyn DOMProcessor<String>> {
    Box::new(FirstNonEmpty { processors })
}

// transformation
pub struct ExtractValue<Out> {
    pub extract: Box<dyn Fn(&ElementRef) -> Out + Sync + Send>,
}

impl<Out> DOMProcessor<Out> for ExtractValue<Out> {
    fn process(&self, el: &ElementRef) -> Out {
        (self.extract)(el)
    }
}

impl<Out: 'static> ExtractValue<Out> {
    pub fn new<Extract>(extract: Extract) -> ExtractValue<Out>
    where
        Extract: Fn(&ElementRef) -> Out + Sync + Send + 'static,
    {
        ExtractValue {
            extract: Box::new(extract),
        }
    }

    pub fn boxed(self) -> Box<dyn DOMProcessor<Out>> {
        Box::new(self)
    }
}

pub fn extract_value<Out, Extract>(extract: Extract) -> Box<dyn DOMProcessor<Out>>
where
    Out: 'static,
    Extract: Fn(&ElementRef) -> Out + Sync + Send + 'static,
{
    ExtractValue::new(extract).boxed()
}

pub struct MapValue<In, Out> {
    pub map: Box<dyn Fn(In) -> Out + Sync + Send>,
    pub sub_processor: Box<dyn DOMProcessor<In>>,
}

impl<In, Out> DOMProcessor<Out> for MapValue<In, Out> {
    fn process(&self, el: &ElementRef) -> Out {
        let input = self.sub_processor.process(el);
        (self.map)(input)
    }
}

impl<In: 'static, Out: 'static> MapValue<In, Out> {
    pub fn new<Map>(map: Map, sub_processor: Box<dyn DOMProcessor<In>>) -> MapValue<In, Out>
    where
        Map: Fn(In) -> Out + 'static + Sync + Send,
    {
        MapValue {
            map: Box::new(map),
            sub_processor,
        }
    }

    pub fn boxed(self) -> Box<dyn DOMProcessor<Out>> {
        Box::new(self)
    }
}

// lists
pub struct ItemsProcessor<Item> {
    pub scope: Selector,
    pub item_processor: Box<dyn DOMProcessor<Item>>,
}

impl<Item> DOMProcessor<Vec<Item>> for ItemsProcessor<Item> {
    fn process(&self, el: &ElementRef) -> Vec<Item> {
        el.select(&self.scope)
            .map(|e| self.item_processor.process(&e))
            .collect()
    }
}

impl<Item: 'static> ItemsProcessor<Item> {
    pub fn new(scope: &str, item_processor: Box<dyn DOMProcessor<Item>>) -> ItemsProcessor<Item> {
        ItemsProcessor {
            scope: Selector::parse(scope).unwrap(),
            item_processor,
        }
    }

    pub fn filter<Predicate>(self, predicate: Predicate) -> FilterProcessor<Item>
    where
        Predicate: Fn(&Item) -> bool + 'static + Sync + Send,
    {
        FilterProcessor::new(predicate, Box::new(self))
    }
}

pub struct FilterProcessor<Item> {
    pub predicate: Box<dyn Fn(&Item) -> bool + Sync + Send>,
    pub items_processor: Box<dyn DOMProcessor<Vec<Item>>>,
}

impl<Item> DOMProcessor<Vec<Item>> for FilterProcessor<Item> {
    fn process(&self, el: &ElementRef) -> Vec<Item> {
        self.items_processor
            .process(el)
            .into_iter()
            .filter(|i| (self.predicate)(i))
            .collect()
    }
}

impl<Item> FilterProcessor<Item> {
    pub fn new<Predicate>(
        predicate: Predicate,
        items_processor: Box<dyn DOMProcessor<Vec<Item>>>,
    ) -> FilterProcessor<Item>
    where
        Predicate: Fn(&Item) -> bool + Sync + Send + 'static,
    {
        FilterProcessor {
            predicate: Box::new(predicate),
            items_processor,
        }
    }
}

// scope
pub struct ScopeProcessor<Item> {
    pub scope: Selector,
    pub item_processor: Box<dyn DOMProcessor<Item>>,
}

impl<Item> DOMProcessor<Option<Item>> for ScopeProcessor<Item> {
    fn process(&self, el: &ElementRef) -> Option<Item> {
        el.select(&self.scope)
            .map(|e| self.item_processor.process(&e))
            .next()
    }
}

impl<Item: 'static> ScopeProcessor<Item> {
    pub fn new(scope: &str, item_processor: Box<dyn DOMProcessor<Item>>) -> ScopeProcessor<Item> {
        ScopeProcessor {
            scope: Selector::parse(scope).unwrap(),
            item_processor,
        }
    }

    pub fn map<Map, Out>(self, map: Map) -> MapValue<Option<Item>, Out>
    where
        Map: Fn(Option<Item>) -> Out + 'static + Sync + Send,
        Out: 'static,
    {
        MapValue::new(map, Box::new(self))
    }
}

impl<Item: Default + 'static> ScopeProcessor<Item> {
    pub fn unwrap_or_default(self) -> MapValue<Option<Item>, Item> {
        MapValue::new(|opt| opt.unwrap_or_default(), Box::new(self))
    }
}

pub fn scope_processor<Item: 'static>(
    scope: &str,
    item_processor: Box<dyn DOMProcessor<Item>>,
) -> ScopeProcessor<Item> {
    ScopeProcessor::new(scope, item_processor)
}

/// Number of elements matching `selectors`.
pub fn count_value(selectors: &str) -> Box<dyn DOMProcessor<u32>> {
    let selector = Selector::parse(selectors).unwrap();
    extract_value(move |el| el.select(&selector).count() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::scrap_html;

    const HTML: &str = r#"
        <div class="list">
            <article class="item"><h3><a href="/a/"> First </a></h3><img src=" /a.jpg "></article>
            <article class="item"><h3><a href="/b/">Second <b>part</b></a></h3></article>
        </div>"#;

    #[test]
    fn should_extract_text_and_attrs() {
        assert_eq!("First", scrap_html(HTML, &*text_value(".item h3 a")));
        assert_eq!("/a.jpg", scrap_html(HTML, &*attr_value(".item img", "src")));
        assert_eq!("", scrap_html(HTML, &*attr_value(".missing", "src")));
        assert_eq!(
            "fallback",
            scrap_html(HTML, &*text_value_or(".missing", "fallback"))
        );
    }

    #[test]
    fn should_process_items() {
        let processor = ItemsProcessor::new(".item", text_value("h3 a"))
            .filter(|title: &String| title.starts_with("Second"));

        assert_eq!(vec!["Second part".to_string()], scrap_html(HTML, &processor));
        assert_eq!(2, scrap_html(HTML, &*count_value(".item")));
    }

    #[test]
    fn should_take_first_non_empty() {
        let processor = first_non_empty(vec![
            attr_value(".item img", "data-src"),
            text_value(".missing"),
            attr_value(".item img", "src"),
        ]);

        assert_eq!("/a.jpg", scrap_html(HTML, &*processor));
    }

    #[test]
    fn should_map_attr_value() {
        let processor = attr_value_map(".item h3 a", "href", |href| href.trim_matches('/').into());

        assert_eq!("a", scrap_html(HTML, &*processor));
    }
}
