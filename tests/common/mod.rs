//! Common test utilities for integration tests

use httpmock::prelude::*;
use httpmock::Mock;
use std::path::Path;
use vms_openkits::config::ResolvedConfig;

/// Registers a GET route on `server` answering 200 with `body`.
///
/// Paths without a route get httpmock's default 404.
#[allow(dead_code)]
pub async fn serve<'a>(server: &'a MockServer, path: &str, body: &[u8]) -> Mock<'a> {
    let body = body.to_vec();
    server
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("content-type", "text/html")
                .body(body);
        })
        .await
}

/// Configuration pointing both page URLs at `server` and keeping the cache
/// and downloads under `dir`.
#[allow(dead_code)]
pub fn config_for(server: &MockServer, dir: &Path) -> ResolvedConfig {
    ResolvedConfig {
        catalog_url: server.url("/"),
        base_url: server.url("/"),
        cache_dir: dir.join("cache"),
        download_dir: dir.join("kits"),
        ..ResolvedConfig::default()
    }
}

/// Catalog page with two open-source products and one commercial one
#[allow(dead_code)]
pub const CATALOG_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Products</title></head>
<body>
  <div id="hs_cos_wrapper_main_content-module-2" class="hs_cos_wrapper">
    <div id="app"></div>
    <script>
      new ProductList({
        el: '#app',
        resources: [{"id": 101, "title": "zlib", "alpha": "1.2.11", "alpha_release_date": "2021-03-01", "integrity": "1.2.11", "integrity_release_date": "2021-03-01", "x86": "1.3", "release_date": "2023-09-12", "open_source": [{"name": "Yes"}], "link": {"url": {"href": "/products/zlib"}}}, {"id": 102, "title": "Apache Web Server", "alpha": "2.4", "x86": "2.4", "release_date": "2023-01-01", "open_source": [{"name": "No"}], "link": {"url": {"href": "/products/apache"}}}, {"id": 103, "title": "bash", "alpha": null, "integrity": "5.0", "integrity_release_date": "2020-06-01", "x86": "not ported", "open_source": [{"name": "Yes"}], "link": {"url": {"href": "/products/bash"}}}],
        pageSize: 50
      });
    </script>
  </div>
</body>
</html>
"#;

/// Detail page with two kit links and one unrelated link
#[allow(dead_code)]
pub const ZLIB_DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <section class="single-solution">
    <h1>zlib</h1>
    <ul class="single-solution__downloads-list">
      <li><a href="http://vmssoftware.com/openkits/x86opensource/vsi-x86vms-zlib-v0103.zip">x86</a></li>
      <li><a href="https://vmssoftware.com/openkits/i64opensource/vsi-i64vms-zlib-v0102.zipexe">Integrity</a></li>
      <li><a href="https://vmssoftware.com/docs/zlib-release-notes.pdf">Release notes</a></li>
    </ul>
  </section>
</body>
</html>
"#;

/// Detail page without a download list
#[allow(dead_code)]
pub const BASH_DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html><body><section class="single-solution"><p>Coming soon</p></section></body></html>
"#;

/// Catalog page whose two open-source products carry no id
#[allow(dead_code)]
pub const ID_LESS_CATALOG_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="hs_cos_wrapper_main_content-module-2">
    <script>
      new ProductList({
        resources: [{"title": "alpha", "x86": "1.0", "open_source": [{"name": "Yes"}], "link": {"url": {"href": "/a"}}}, {"title": "beta", "x86": "2.0", "open_source": [{"name": "Yes"}], "link": {"url": {"href": "/b"}}}],
      });
    </script>
  </div>
</body>
</html>
"#;

/// Detail page listing a single x86 kit called `kit_name`
#[allow(dead_code)]
pub fn detail_page(kit_name: &str) -> Vec<u8> {
    format!(
        r#"<html><body>
  <ul class="single-solution__downloads-list">
    <li><a href="https://vmssoftware.com/openkits/x86opensource/{kit_name}">x86</a></li>
  </ul>
</body></html>"#
    )
    .into_bytes()
}
