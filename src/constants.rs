// Vendor endpoints
pub const CATALOG_URL: &str = "https://products.vmssoftware.com";
pub const PRODUCT_BASE_URL: &str = "https://products.vmssoftware.com";

// Catalog page: the product list is a JSON array assigned to `resources:`
// inside a script block of this container.
pub const CATALOG_CONTAINER_ID: &str = "hs_cos_wrapper_main_content-module-2";
pub const CATALOG_RESOURCES_PATTERN: &str = r"(?m)^\s*resources:\s*(.+),\r?$";
pub const OPEN_SOURCE_MARKER: &str = "Yes";
pub const NOT_PORTED: &str = "not ported";

// Product detail page
pub const DOWNLOAD_LIST_SELECTOR: &str = ".single-solution__downloads-list";
pub const KIT_URL_PATTERN: &str =
    r"(?i)(https?://vmssoftware\.com/openkits/(?:alp|i64|x86)opensource/([^.]+\.zip(?:exe)?))";

// Cache file names
pub const CATALOG_CACHE_FILE: &str = "products.html";
pub const PRODUCT_CACHE_PREFIX: &str = "product-";

// Menu help, worded after the PRODUCT INSTALL utility
pub const MENU_HELP_TEXT: &str = "
    Type the number representing each selected menu item.  Separate your
    answers with commas.  You may also select a range of numbers by using
    a hyphen between the starting and ending numbers.  The range can be
    specified in any order, smallest to highest, or highest to smallest.
    For example: 1-3, 5, 7, 11-9
";
