use marquee::MediaDescriptor;

pub struct DescriptorBuilder {
    id: String,
    title: String,
    source: String,
}

impl DescriptorBuilder {
    pub fn movie(title: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            source: "feature.mp4".to_string(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn build(self) -> MediaDescriptor {
        MediaDescriptor::new(self.id, self.title, self.source)
    }
}
