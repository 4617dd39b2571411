use std::path::Path;

use crate::error::Result;
use crate::render::write_output;

const DEPLOYMENT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Deployment Success</title>
</head>
<body>
    <h1>Website Created Successfully!</h1>
    <p>Your Summer of Electronics 2.0 website has been generated.</p>
</body>
</html>
"#;

/// Placeholder page confirming the site was generated.
pub fn deployment_page() -> &'static str {
    DEPLOYMENT_PAGE
}

pub fn write_deployment_page(path: &Path) -> Result<()> {
    write_output(DEPLOYMENT_PAGE, path)
}
