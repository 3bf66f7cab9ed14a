//! The host document: named anchors the maps attach to, and the readiness
//! signal that gates the first draw.

use crate::error::Result;
use crate::map::MountedMap;
use crate::scene::Element;

/// Default name of the host's readiness event
pub const READY_EVENT: &str = "odyssey:api";

const PAGE_TITLE: &str = "Solar eclipses in Australia";

/// What an anchor currently shows
#[derive(Clone, Debug)]
pub enum Content {
    Map(MountedMap),
    /// Development error display in place of a map
    Error(Element),
}

/// An element in the host page that a map can attach to
#[derive(Clone, Debug)]
pub struct Anchor {
    id: String,
    content: Option<Content>,
}

impl Anchor {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            content: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn mounted(&self) -> Option<&MountedMap> {
        match &self.content {
            Some(Content::Map(map)) => Some(map),
            _ => None,
        }
    }

    pub(crate) fn mount(&mut self, map: MountedMap) {
        self.content = Some(Content::Map(map));
    }

    pub(crate) fn show_error(&mut self, error: Element) {
        self.content = Some(Content::Error(error));
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    pub fn to_element(&self) -> Element {
        let el = Element::new("div").attr("id", &self.id);
        match &self.content {
            Some(Content::Map(map)) => el.child(map.markup().clone()),
            Some(Content::Error(error)) => el.child(error.clone()),
            None => el,
        }
    }
}

/// Deferred work waiting for the page to become ready
pub type ReadyHook = Box<dyn FnOnce(&mut Page) -> Result<()>>;

/// A ready flag plus a one-shot queue of hooks.
///
/// Hooks registered before the flag is set wait in the queue; hooks
/// registered afterwards run immediately. The queue drains exactly once.
pub struct ReadySignal {
    event: String,
    ready: bool,
    pending: Vec<ReadyHook>,
}

impl ReadySignal {
    fn new(event: &str) -> Self {
        Self {
            event: event.to_string(),
            ready: false,
            pending: Vec::new(),
        }
    }
}

/// The document hosting the maps
pub struct Page {
    anchors: Vec<Anchor>,
    ready: ReadySignal,
}

impl Page {
    /// A page containing exactly the given anchor ids, in document order
    pub fn with_anchors<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            anchors: ids.into_iter().map(|id| Anchor::new(id.as_ref())).collect(),
            ready: ReadySignal::new(READY_EVENT),
        }
    }

    pub fn ready_event(mut self, event: &str) -> Self {
        self.ready.event = event.to_string();
        self
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor(&self, id: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.id == id)
    }

    /// `None` when the page has no such anchor
    pub fn anchor_mut(&mut self, id: &str) -> Option<&mut Anchor> {
        self.anchors.iter_mut().find(|a| a.id == id)
    }

    pub fn clear_anchors(&mut self) {
        self.anchors.iter_mut().for_each(Anchor::clear);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.ready
    }

    pub fn pending_hooks(&self) -> usize {
        self.ready.pending.len()
    }

    /// Run `hook` now if the page is ready, otherwise once it becomes ready
    pub fn on_ready<H>(&mut self, hook: H) -> Result<()>
    where
        H: FnOnce(&mut Page) -> Result<()> + 'static,
    {
        if self.ready.ready {
            return hook(self);
        }
        tracing::debug!(event = %self.ready.event, "Waiting for page readiness");
        self.ready.pending.push(Box::new(hook));
        Ok(())
    }

    /// Set the ready flag and run every queued hook in registration order.
    /// A failing hook does not stop the ones after it; the first error is
    /// returned once all have run. Later calls do nothing.
    pub fn signal_ready(&mut self) -> Result<()> {
        if self.ready.ready {
            return Ok(());
        }
        self.ready.ready = true;

        let hooks = std::mem::take(&mut self.ready.pending);
        tracing::info!(event = %self.ready.event, hooks = hooks.len(), "Page ready");

        let mut first_error = None;
        for hook in hooks {
            if let Err(e) = hook(self) {
                tracing::error!(event = %self.ready.event, error = %e, "Ready hook failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// The first drawn map's `<svg>`, for standalone export
    pub fn first_svg(&self) -> Option<&Element> {
        self.anchors.iter().find_map(|a| a.mounted()?.svg())
    }

    pub fn to_html(&self) -> String {
        let head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(Element::new("title").text(PAGE_TITLE));
        let body = Element::new("body").children(self.anchors.iter().map(Anchor::to_element));
        let html = Element::new("html").attr("lang", "en").child(head).child(body);
        format!("<!DOCTYPE html>\n{}\n", html.to_markup())
    }
}
