use anyhow::Result;
use feed_core::FeedRecord;

/// Client for a published feed endpoint
#[derive(Debug)]
pub struct FeedClient {
    feed_url: String,
}

impl FeedClient {
    pub fn new(feed_url: String) -> Self {
        Self { feed_url }
    }

    pub async fn fetch_feed(&self) -> Result<FeedRecord> {
        let response = ureq::get(&self.feed_url).call()?;
        if response.status() != 200 {
            return Err(anyhow::anyhow!(
                "feed endpoint returned HTTP {}",
                response.status()
            ));
        }
        let record: FeedRecord = response.into_json()?;
        Ok(record)
    }
}
