use crc32fast::Hasher;

/// Generate a field seed from a session key using CRC32
pub fn get_field_id(key: &str) -> String {
    let mut buff = String::from(key);
    if !key.starts_with("field://") {
        buff = format!("field://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for segments within one editing session
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        Self {
            seed: get_field_id(key),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Advance past any of `ids` this generator could have issued
    pub fn reserve<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let prefix = format!("{}-", self.seed);
        let highest = ids
            .into_iter()
            .filter_map(|id| id.strip_prefix(prefix.as_str()))
            .filter_map(|n| n.parse::<u32>().ok())
            .max();

        if let Some(highest) = highest {
            self.count = self.count.max(highest);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("")
    }
}
