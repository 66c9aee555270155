//! The per-invocation context: repository, layout, manifest and encoder.
//!
//! Built once by the binary and passed by reference into
//! [`generate`](crate::snapshot::generate) and [`apply`](crate::switch::apply).

use std::path::Path;

use ccoco_git::{GitRepo, GixRepo};

use crate::encode::{Base58Encoder, PathEncoder};
use crate::error::Result;
use crate::layout::Layout;
use crate::manifest::Manifest;

pub struct Context {
    repo: Box<dyn GitRepo>,
    layout: Layout,
    manifest: Manifest,
    encoder: Box<dyn PathEncoder>,
}

impl Context {
    /// Assemble a context from parts. Uses the [`Base58Encoder`].
    pub fn new(repo: Box<dyn GitRepo>, layout: Layout, manifest: Manifest) -> Self {
        Self {
            repo,
            layout,
            manifest,
            encoder: Box::new(Base58Encoder),
        }
    }

    /// Discover the repository containing `cwd`, use the default layout at
    /// its working-tree root and load the manifest from there.
    ///
    /// # Errors
    /// Fails if no repository is found or the manifest is unreadable.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let repo = GixRepo::discover(cwd)?;
        let layout = Layout::new(repo.workdir());
        let manifest = Manifest::load(&layout.manifest_path())?;
        Ok(Self::new(Box::new(repo), layout, manifest))
    }

    /// Replace the snapshot name encoder.
    #[must_use]
    pub fn with_encoder(mut self, encoder: Box<dyn PathEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn repo(&self) -> &dyn GitRepo {
        self.repo.as_ref()
    }

    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    pub const fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub const fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    pub fn encoder(&self) -> &dyn PathEncoder {
        self.encoder.as_ref()
    }

    /// Persist the manifest to the layout's manifest path.
    ///
    /// # Errors
    /// See [`Manifest::save`].
    pub fn save_manifest(&self) -> Result<()> {
        self.manifest.save(&self.layout.manifest_path())
    }
}
