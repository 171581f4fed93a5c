use std::fmt;

/// Hardware platforms the vendor publishes ports for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Alpha,
    Integrity,
    X86,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Alpha, Platform::Integrity, Platform::X86];

    /// Short label used in the product summary.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alpha => "AXP",
            Self::Integrity => "I64",
            Self::X86 => "x86",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Version and release date of a product on one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformRelease {
    pub version: Option<String>,
    pub release_date: Option<String>,
}

impl PlatformRelease {
    /// A release counts as available unless the version is empty or marked
    /// "not ported".
    pub fn is_available(&self) -> bool {
        match self.version.as_deref() {
            Some(v) => !v.is_empty() && v != crate::constants::NOT_PORTED,
            None => false,
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Vendor identifier, used to name the detail page cache file
    pub id: String,
    pub title: String,
    pub alpha: PlatformRelease,
    pub integrity: PlatformRelease,
    pub x86: PlatformRelease,
    pub open_source: bool,
    /// Detail page link, relative to the product base URL
    pub link: Option<String>,
    /// Display index; only open-source products get one
    pub index: Option<usize>,
}

impl Product {
    pub fn release(&self, platform: Platform) -> &PlatformRelease {
        match platform {
            Platform::Alpha => &self.alpha,
            Platform::Integrity => &self.integrity,
            Platform::X86 => &self.x86,
        }
    }
}

/// All products parsed from one fetch of the catalog page, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog and assigns display indices.
    ///
    /// Products are ranked by lowercase title; open-source products receive
    /// consecutive indices in that order and all others get `None`. Source
    /// order of `products` is preserved.
    pub fn new(mut products: Vec<Product>) -> Self {
        let mut order: Vec<usize> = (0..products.len()).collect();
        order.sort_by_cached_key(|&i| products[i].title.to_lowercase());

        let mut next = 0;
        for i in order {
            let product = &mut products[i];
            if product.open_source {
                product.index = Some(next);
                next += 1;
            } else {
                product.index = None;
            }
        }

        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Open-source products in display order.
    pub fn open_source(&self) -> Vec<&Product> {
        let mut listed: Vec<&Product> = self.products.iter().filter(|p| p.index.is_some()).collect();
        listed.sort_by_key(|p| p.index);
        listed
    }

    /// Products whose display index is in `indices`, in source order.
    pub fn select(&self, indices: &[usize]) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.index.is_some_and(|i| indices.contains(&i)))
            .collect()
    }
}

/// A downloadable archive for one product/platform combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    pub name: String,
    pub url: String,
}

/// Kits of one product keyed by name, in the order they first appeared on
/// the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KitList {
    kits: Vec<Kit>,
}

impl KitList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a kit. A name seen before keeps its position and takes the
    /// new URL.
    pub fn insert(&mut self, name: String, url: String) {
        match self.kits.iter_mut().find(|k| k.name == name) {
            Some(existing) => existing.url = url,
            None => self.kits.push(Kit { name, url }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.kits
            .iter()
            .find(|k| k.name == name)
            .map(|k| k.url.as_str())
    }

    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kit> {
        self.kits.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.kits.iter().map(|k| k.name.clone()).collect()
    }

    /// Kits at the given zero-based positions, in list order.
    pub fn select(&self, indices: &[usize]) -> Vec<&Kit> {
        self.kits
            .iter()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, kit)| kit)
            .collect()
    }
}
