use std::fmt;
use std::path::{Path, PathBuf};

use crate::data::{self, AustraliaData, ClassNames, WorldData};
use crate::error::{MapError, Result};
use crate::map::{AustraliaMap, MountedMap, WorldMap};
use crate::page::{Anchor, Page};
use crate::scene::error_box;

/// Which map to draw into an anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Australia,
    World,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Australia, Variant::World];

    /// Id of the host element this variant attaches to
    pub fn anchor_id(self) -> &'static str {
        match self {
            Variant::Australia => "australiamap",
            Variant::World => "worldmap",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Australia => "australia",
            Variant::World => "world",
        })
    }
}

/// A map that draws once when mounted and never updates
pub trait MapComponent {
    fn variant(&self) -> Variant;

    /// Render the markup and run the one-shot draw
    fn mount(&self) -> Result<MountedMap>;
}

/// Supplies map components with their datasets
pub trait ComponentFactory {
    fn create(&self, variant: Variant) -> Result<Box<dyn MapComponent>>;

    fn classes(&self) -> &ClassNames;
}

/// Loads datasets from a directory each time a component is created
pub struct DirectoryFactory {
    dir: PathBuf,
    classes: ClassNames,
}

impl DirectoryFactory {
    pub fn new(dir: &Path, classes: ClassNames) -> Self {
        Self {
            dir: dir.to_path_buf(),
            classes,
        }
    }
}

impl ComponentFactory for DirectoryFactory {
    fn create(&self, variant: Variant) -> Result<Box<dyn MapComponent>> {
        let component: Box<dyn MapComponent> = match variant {
            Variant::Australia => Box::new(AustraliaMap::new(data::load_australia(&self.dir)?, self.classes.clone())),
            Variant::World => Box::new(WorldMap::new(data::load_world(&self.dir)?, self.classes.clone())),
        };
        Ok(component)
    }

    fn classes(&self) -> &ClassNames {
        &self.classes
    }
}

/// Hands out components built from datasets already in memory
#[derive(Default)]
pub struct StaticFactory {
    pub australia: Option<AustraliaData>,
    pub world: Option<WorldData>,
    pub classes: ClassNames,
}

impl ComponentFactory for StaticFactory {
    fn create(&self, variant: Variant) -> Result<Box<dyn MapComponent>> {
        match variant {
            Variant::Australia => self
                .australia
                .clone()
                .map(|d| Box::new(AustraliaMap::new(d, self.classes.clone())) as Box<dyn MapComponent>),
            Variant::World => self
                .world
                .clone()
                .map(|d| Box::new(WorldMap::new(d, self.classes.clone())) as Box<dyn MapComponent>),
        }
        .ok_or(MapError::MissingDataset(variant))
    }

    fn classes(&self) -> &ClassNames {
        &self.classes
    }
}

/// Production lets mount failures propagate; development swaps in an error box
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BuildMode {
    Production,
    Development,
}

/// Picks a map variant per anchor and mounts it
pub struct App<F> {
    factory: F,
    mode: BuildMode,
}

impl<F: ComponentFactory> App<F> {
    pub fn new(factory: F, mode: BuildMode) -> Self {
        Self { factory, mode }
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Mount `variant` into `anchor`.
    ///
    /// A missing anchor is skipped silently. An anchor that already holds a
    /// map keeps it as drawn.
    pub fn attach(&self, anchor: Option<&mut Anchor>, variant: Variant) -> Result<()> {
        let Some(anchor) = anchor else {
            tracing::debug!(%variant, anchor = variant.anchor_id(), "Anchor not on page, skipping");
            return Ok(());
        };

        if anchor.mounted().is_some() {
            tracing::debug!(%variant, anchor = anchor.id(), "Map already mounted, leaving it as drawn");
            return Ok(());
        }

        let mounted = self.factory.create(variant).and_then(|component| {
            tracing::debug!(variant = %component.variant(), "Drawing map");
            component.mount()
        });

        match mounted {
            Ok(map) => {
                tracing::info!(%variant, anchor = anchor.id(), "Mounted map");
                anchor.mount(map);
                Ok(())
            }
            Err(e) => match self.mode {
                BuildMode::Production => Err(e),
                BuildMode::Development => {
                    tracing::error!(%variant, anchor = anchor.id(), error = %e, "Map failed to mount");
                    anchor.show_error(error_box(&self.factory.classes().error_box, &e.to_string()));
                    Ok(())
                }
            },
        }
    }

    /// Attach every variant to its anchor
    pub fn init(&self, page: &mut Page) -> Result<()> {
        for variant in Variant::ALL {
            self.attach(page.anchor_mut(variant.anchor_id()), variant)?;
        }
        Ok(())
    }

    /// Drop whatever is mounted and attach everything again
    pub fn reload(&self, page: &mut Page) -> Result<()> {
        tracing::info!("Reloading maps");
        page.clear_anchors();
        self.init(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::page::Content;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts how often a component is created
    struct Counting {
        inner: StaticFactory,
        created: Rc<Cell<usize>>,
    }

    impl ComponentFactory for Counting {
        fn create(&self, variant: Variant) -> Result<Box<dyn MapComponent>> {
            self.created.set(self.created.get() + 1);
            self.inner.create(variant)
        }

        fn classes(&self) -> &ClassNames {
            &self.inner.classes
        }
    }

    fn full_factory() -> StaticFactory {
        StaticFactory {
            australia: Some(fixtures::australia_data()),
            world: Some(fixtures::world_data()),
            classes: ClassNames::default(),
        }
    }

    #[test]
    fn test_init_dispatches_per_anchor() {
        let app = App::new(full_factory(), BuildMode::Production);
        let mut page = Page::with_anchors(["australiamap", "worldmap"]);
        app.init(&mut page).unwrap();

        let aus = page.anchor("australiamap").unwrap().mounted().unwrap();
        let world = page.anchor("worldmap").unwrap().mounted().unwrap();
        assert_eq!(aus.variant(), Variant::Australia);
        assert_eq!(world.variant(), Variant::World);
        assert!(aus.markup().find_by_id("australia").is_some());
        assert!(world.markup().find_by_id("world").is_some());
    }

    #[test]
    fn test_missing_anchor_is_silent() {
        let created = Rc::new(Cell::new(0));
        let app = App::new(
            Counting {
                inner: full_factory(),
                created: Rc::clone(&created),
            },
            BuildMode::Production,
        );
        let mut page = Page::with_anchors(["australiamap"]);
        app.init(&mut page).unwrap();
        assert_eq!(created.get(), 1);
        assert!(page.anchor("australiamap").unwrap().mounted().is_some());
    }

    #[test]
    fn test_reattach_does_not_redraw() {
        let created = Rc::new(Cell::new(0));
        let app = App::new(
            Counting {
                inner: full_factory(),
                created: Rc::clone(&created),
            },
            BuildMode::Production,
        );
        let mut page = Page::with_anchors(["australiamap"]);
        app.init(&mut page).unwrap();
        let before = page.to_html();

        app.init(&mut page).unwrap();
        app.attach(page.anchor_mut("australiamap"), Variant::Australia).unwrap();

        assert_eq!(created.get(), 1);
        assert_eq!(page.to_html(), before);
    }

    #[test]
    fn test_production_propagates_errors() {
        let app = App::new(StaticFactory::default(), BuildMode::Production);
        let mut page = Page::with_anchors(["australiamap"]);
        let err = app.init(&mut page).unwrap_err();
        assert!(matches!(err, MapError::MissingDataset(Variant::Australia)));
        assert!(page.anchor("australiamap").unwrap().content().is_none());
    }

    #[test]
    fn test_development_shows_error_box() {
        let app = App::new(StaticFactory::default(), BuildMode::Development);
        let mut page = Page::with_anchors(["australiamap", "worldmap"]);
        app.init(&mut page).unwrap();

        for id in ["australiamap", "worldmap"] {
            match page.anchor(id).unwrap().content() {
                Some(Content::Error(el)) => {
                    assert!(el.text_content().contains("no dataset configured"));
                    assert!(el.has_class(&ClassNames::default().error_box));
                }
                other => panic!("expected an error box, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reload_redraws() {
        let created = Rc::new(Cell::new(0));
        let app = App::new(
            Counting {
                inner: full_factory(),
                created: Rc::clone(&created),
            },
            BuildMode::Development,
        );
        let mut page = Page::with_anchors(["australiamap"]);
        app.init(&mut page).unwrap();
        app.reload(&mut page).unwrap();
        assert_eq!(created.get(), 2);
        assert!(page.anchor("australiamap").unwrap().mounted().is_some());
    }

    #[test]
    fn test_init_waits_for_ready_signal() {
        let app = Rc::new(App::new(full_factory(), BuildMode::Production));
        let mut page = Page::with_anchors(["australiamap"]);

        let hook_app = Rc::clone(&app);
        page.on_ready(move |page| hook_app.init(page)).unwrap();
        assert!(page.first_svg().is_none());

        page.signal_ready().unwrap();
        assert!(page.first_svg().is_some());
    }

    #[test]
    fn test_directory_factory_loads_at_mount() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_australia_dir(dir.path());

        let app = App::new(DirectoryFactory::new(dir.path(), ClassNames::default()), BuildMode::Production);
        let mut page = Page::with_anchors(["australiamap"]);
        app.init(&mut page).unwrap();
        let svg = page.first_svg().unwrap();
        assert_eq!(svg.find_all("textPath").len(), 8);
    }

    #[test]
    fn test_directory_factory_bad_overlay_in_development() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_australia_dir(dir.path());
        std::fs::write(
            dir.path().join(data::eclipse_file_name(2066)),
            r#"{"type":"FeatureCollection","label":"2066","labelOffset":5,"features":[]}"#,
        )
        .unwrap();

        let app = App::new(DirectoryFactory::new(dir.path(), ClassNames::default()), BuildMode::Development);
        let mut page = Page::with_anchors(["australiamap"]);
        app.init(&mut page).unwrap();
        let html = page.to_html();
        assert!(html.contains("expected at least 3 features, found 0"));
    }
}
