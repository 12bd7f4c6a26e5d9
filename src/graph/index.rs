use crate::workflow::Link;
use ahash::AHashMap;

/// Incoming-edge lookup keyed by target node id.
///
/// Built once per analysis. Each bucket keeps the links in their original
/// document order.
#[derive(Debug, Default)]
pub struct EdgeIndex<'a> {
    incoming: AHashMap<&'a str, Vec<&'a Link>>,
}

impl<'a> EdgeIndex<'a> {
    pub fn new(links: &'a [Link]) -> Self {
        let mut incoming: AHashMap<&'a str, Vec<&'a Link>> = AHashMap::new();
        for link in links {
            incoming.entry(link.target.as_str()).or_default().push(link);
        }
        Self { incoming }
    }

    /// All links terminating at `target`, in order of appearance.
    pub fn incoming(&self, target: &str) -> &[&'a Link] {
        self.incoming
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
