/// A container image known by one or more equivalent references.
///
/// Digests are content-addressed and tried first, names (tags) are mutable
/// aliases tried afterwards. Any reference producing a usable scan result is
/// enough to classify the image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    image_id: Option<String>,
    digests: Vec<String>,
    names: Vec<String>,
}

impl Image {
    pub fn new(digests: Vec<String>, names: Vec<String>) -> Self {
        Self {
            image_id: None,
            digests,
            names,
        }
    }

    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }

    pub fn digests(&self) -> &[String] {
        &self.digests
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// References in the order they must be attempted: digests, then names.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.digests
            .iter()
            .chain(self.names.iter())
            .map(String::as_str)
    }

    pub fn has_references(&self) -> bool {
        !self.digests.is_empty() || !self.names.is_empty()
    }
}
