use anyhow::Result;
use log::debug;

use crate::database::PackageDatabase;
use crate::package::{Category, Package};
use crate::runtime::Runtime;

use super::config::Config;

/// List installed packages grouped by category
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let database = config.load_database(&runtime);
    debug!("Loaded {} installed package(s)", database.len());

    for line in render(&database) {
        println!("{}", line);
    }
    Ok(())
}

fn heading(category: Category) -> &'static str {
    match category {
        Category::Route => "Routes:",
        Category::Train => "Trains:",
        Category::Other => "Other:",
    }
}

pub(crate) fn describe(package: &Package) -> String {
    if package.name.is_empty() {
        format!("{} {}", package.id, package.version)
    } else {
        format!("{} ({}) {}", package.name, package.id, package.version)
    }
}

fn render(database: &PackageDatabase) -> Vec<String> {
    if database.is_empty() {
        return vec!["No packages installed.".to_string()];
    }

    let mut lines = Vec::new();
    for category in Category::ALL {
        let packages = database.partition(category);
        if packages.is_empty() {
            continue;
        }
        lines.push(heading(category).to_string());
        lines.extend(packages.iter().map(|p| format!("  {}", describe(p))));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&PackageDatabase::new()), vec!["No packages installed."]);
    }

    #[test]
    fn test_render_groups_and_skips_empty_categories() {
        let mut db = PackageDatabase::new();
        db.insert(Package::new("emu", "2.0".parse().unwrap(), Category::Train).with_name("EMU 200"));
        db.insert(Package::new("sig", "1".parse().unwrap(), Category::Other));

        assert_eq!(
            render(&db),
            vec!["Trains:", "  EMU 200 (emu) 2.0", "Other:", "  sig 1"]
        );
    }
}
