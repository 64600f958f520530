//! Bucketing classified pages by document type

use claimdesk_domain::{ClassifiedPage, DocumentType};

/// All page texts of one document type, in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeBucket {
    /// Label shared by every page in the bucket
    pub doc_type: DocumentType,

    /// Page texts, document order then page order
    pub pages: Vec<String>,
}

impl TypeBucket {
    /// Create an empty bucket
    pub fn new(doc_type: DocumentType) -> Self {
        Self {
            doc_type,
            pages: Vec::new(),
        }
    }

    /// The bucket's pages joined with newlines
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}

/// Buckets keyed by label, in order of each label's first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeBuckets {
    buckets: Vec<TypeBucket>,
}

impl TypeBuckets {
    /// Append one classified page to its label's bucket
    pub fn push(&mut self, page: ClassifiedPage) {
        let ClassifiedPage { page, label } = page;
        match self.buckets.iter_mut().find(|b| b.doc_type == label) {
            Some(bucket) => bucket.pages.push(page.text),
            None => {
                let mut bucket = TypeBucket::new(label);
                bucket.pages.push(page.text);
                self.buckets.push(bucket);
            }
        }
    }

    /// Look up the bucket for a label
    pub fn get(&self, doc_type: &DocumentType) -> Option<&TypeBucket> {
        self.buckets.iter().find(|b| &b.doc_type == doc_type)
    }

    /// Labels observed, in first-appearance order
    pub fn labels(&self) -> Vec<DocumentType> {
        self.buckets.iter().map(|b| b.doc_type.clone()).collect()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no page has been added
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate over the buckets
    pub fn iter(&self) -> std::slice::Iter<'_, TypeBucket> {
        self.buckets.iter()
    }
}

impl IntoIterator for TypeBuckets {
    type Item = TypeBucket;
    type IntoIter = std::vec::IntoIter<TypeBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl FromIterator<ClassifiedPage> for TypeBuckets {
    fn from_iter<I: IntoIterator<Item = ClassifiedPage>>(iter: I) -> Self {
        aggregate(iter)
    }
}

/// Fold classified pages into buckets
///
/// No page is dropped: unrecognized labels get their own bucket so the
/// caller can report them.
pub fn aggregate<I>(pages: I) -> TypeBuckets
where
    I: IntoIterator<Item = ClassifiedPage>,
{
    pages.into_iter().fold(TypeBuckets::default(), |mut buckets, page| {
        buckets.push(page);
        buckets
    })
}
