/// Monotonic request ticket for async flows: only the newest ticket may apply.
#[derive(Debug, Default, Clone)]
pub struct RequestGeneration {
    latest: u64,
}

impl RequestGeneration {
    pub fn issue(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1).max(1);
        self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket != 0 && ticket == self.latest
    }
}
