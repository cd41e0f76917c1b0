use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::error::AppError;

const SPRING_BOOT_POM: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>

  <groupId>com.example</groupId>
  <artifactId>spring-temp</artifactId>
  <version>1.0.0</version>
  <packaging>jar</packaging>

  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>@VERSION@</version>
    <relativePath/>
  </parent>

  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
  </dependencies>

</project>
"#;

const SPRING_CLOUD_POM: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>

  <groupId>com.example</groupId>
  <artifactId>spring-temp</artifactId>
  <version>1.0.0</version>
  <packaging>jar</packaging>

  <parent>
    <groupId>org.springframework.cloud</groupId>
    <artifactId>spring-cloud-dependencies</artifactId>
    <version>@VERSION@</version>
    <relativePath/>
  </parent>

  <dependencies>
    <dependency>
      <groupId>org.springframework.cloud</groupId>
      <artifactId>spring-cloud-starter</artifactId>
    </dependency>
  </dependencies>

</project>
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomTemplate {
    SpringBoot,
    SpringCloud,
}

impl PomTemplate {
    pub fn render(&self, version: &str) -> String {
        let template = match self {
            PomTemplate::SpringBoot => SPRING_BOOT_POM,
            PomTemplate::SpringCloud => SPRING_CLOUD_POM,
        };
        template.replace("@VERSION@", version)
    }
}

/// Version declared for `group:artifact` in the `<dependency>` elements of `xml`.
///
/// `${...}` placeholders are resolved against the POM's own `<properties>`,
/// `project.version` and `project.parent.version`; unknown ones are returned verbatim.
pub fn declared_dependency_version(
    xml: &str,
    group: &str,
    artifact: &str,
) -> Result<Option<String>, AppError> {
    let document = Document::parse(xml)?;
    let project = document.root_element();

    let declared = project
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "dependency")
        .find(|dep| {
            child_text(*dep, "groupId") == Some(group)
                && child_text(*dep, "artifactId") == Some(artifact)
        })
        .and_then(|dep| child_text(dep, "version"));

    let Some(version) = declared else {
        return Ok(None);
    };

    let properties = collect_properties(project);
    Ok(Some(resolve_placeholders(version, &properties)))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.is_element() && c.tag_name().name() == name)
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|c| c.text()).map(str::trim)
}

fn collect_properties(project: Node<'_, '_>) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    if let Some(block) = child(project, "properties") {
        for property in block.children().filter(Node::is_element) {
            if let Some(value) = property.text() {
                properties.insert(property.tag_name().name().to_string(), value.trim().to_string());
            }
        }
    }
    if let Some(version) = child_text(project, "version") {
        properties.insert("project.version".to_string(), version.to_string());
    }
    if let Some(version) = child(project, "parent").and_then(|parent| child_text(parent, "version"))
    {
        properties.entry("project.version".to_string()).or_insert_with(|| version.to_string());
        properties.insert("project.parent.version".to_string(), version.to_string());
    }
    properties
}

fn resolve_placeholders(value: &str, properties: &HashMap<String, String>) -> String {
    let mut resolved = value.to_string();
    // At most eight substitutions; self-referencing properties stop there.
    for _ in 0..8 {
        let Some(start) = resolved.find("${") else { break };
        let Some(len) = resolved[start..].find('}') else { break };
        let key = &resolved[start + 2..start + len];
        let Some(replacement) = properties.get(key) else { break };
        resolved.replace_range(start..start + len + 1, replacement);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPRESS_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.apache.commons</groupId>
    <artifactId>commons-parent</artifactId>
    <version>81</version>
  </parent>
  <artifactId>commons-compress</artifactId>
  <version>1.27.1</version>
  <properties>
    <commons.io.version>2.16.1</commons.io.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>commons-codec</groupId>
      <artifactId>commons-codec</artifactId>
      <version>1.17.1</version>
    </dependency>
    <dependency>
      <groupId>commons-io</groupId>
      <artifactId>commons-io</artifactId>
      <version>${commons.io.version}</version>
    </dependency>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
    </dependency>
  </dependencies>
</project>
"#;

    #[test]
    fn templates_embed_requested_version() {
        let boot = PomTemplate::SpringBoot.render("3.4.5");
        assert!(boot.contains("<artifactId>spring-boot-starter-parent</artifactId>"));
        assert!(boot.contains("<version>3.4.5</version>"));
        assert!(!boot.contains("@VERSION@"));

        let cloud = PomTemplate::SpringCloud.render("2024.0.1");
        assert!(cloud.contains("<artifactId>spring-cloud-dependencies</artifactId>"));
        assert!(cloud.contains("<version>2024.0.1</version>"));
        Document::parse(&cloud).unwrap();
    }

    #[test]
    fn resolves_property_backed_version() {
        let version = declared_dependency_version(COMPRESS_POM, "commons-io", "commons-io").unwrap();
        assert_eq!(version.as_deref(), Some("2.16.1"));
    }

    #[test]
    fn literal_version_is_returned() {
        let version =
            declared_dependency_version(COMPRESS_POM, "commons-codec", "commons-codec").unwrap();
        assert_eq!(version.as_deref(), Some("1.17.1"));
    }

    #[test]
    fn missing_version_or_dependency_yields_none() {
        assert_eq!(
            declared_dependency_version(COMPRESS_POM, "org.apache.commons", "commons-lang3").unwrap(),
            None
        );
        assert_eq!(declared_dependency_version(COMPRESS_POM, "junit", "junit").unwrap(), None);
    }

    #[test]
    fn unknown_property_is_left_verbatim() {
        let props = HashMap::new();
        assert_eq!(resolve_placeholders("${nope}", &props), "${nope}");
    }

    #[test]
    fn project_version_placeholder_resolves() {
        let mut props = HashMap::new();
        props.insert("project.version".to_string(), "1.0".to_string());
        assert_eq!(resolve_placeholders("${project.version}-SNAPSHOT", &props), "1.0-SNAPSHOT");
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(
            declared_dependency_version("<project>", "a", "b"),
            Err(AppError::Xml(_))
        ));
    }
}
