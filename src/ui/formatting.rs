use serde::Serialize;
use std::fmt::Write;
use vetcat_core::*;

/// Options controlling the Markdown report
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportOptions {
    pub group_by: Option<FacetGroupKey>,
    pub show_facets: bool,
}

/// Render the session's current view as Markdown
pub fn render_report<L: FilterListener>(title: &str, session: &FilterSession<L>, options: ReportOptions) -> String {
    let mut out = String::new();
    let store = session.store();
    let filters = store.active_filters();
    let items = session.visible_items();

    let _ = writeln!(out, "# {} ({})\n", title, store.mode());

    if !filters.is_empty() {
        let _ = writeln!(out, "## Active Filters\n");
        let _ = write!(out, "{}", format_active_filters(&filters));
        out.push('\n');
    }

    if session.sort() != SortKey::Default {
        let _ = writeln!(out, "**Sorted by:** {}\n", session.sort());
    }

    if options.show_facets {
        let _ = writeln!(out, "## Facets\n");
        let _ = write!(out, "{}", format_facet_groups(store.state()));
    }

    let _ = writeln!(out, "**Matching Items:** {}\n", session.total_count());

    if items.is_empty() {
        let _ = writeln!(out, "_No items match the specified filters._\n");
    } else if let Some(key) = options.group_by {
        let groups = group_items_by_facet(&items, key, store.category_map());
        for name in get_sorted_group_names(&groups) {
            if let Some(group) = groups.iter().find(|g| g.name == name) {
                let _ = writeln!(out, "## {}: {}\n", key, group.name);
                for item in &group.items {
                    out.push_str(&format_item(item));
                }
            }
        }
    } else {
        for item in &items {
            out.push_str(&format_item(item));
        }
    }

    out
}

/// One bullet per non-empty group, values joined the way the group combines them
pub fn format_active_filters(filters: &ActiveFilters) -> String {
    let mut out = String::new();
    for (key, names) in filters.iter().filter(|(_, names)| !names.is_empty()) {
        let _ = writeln!(out, "- **{}:** {}", key, names.join(" OR "));
    }
    out
}

/// Facet groups with counts; active facets are checked
pub fn format_facet_groups(state: &FacetGroupSet) -> String {
    let mut out = String::new();
    for key in state.keys() {
        let facets = state.group(*key).unwrap_or(&[]);
        let _ = writeln!(out, "### {}\n", key);
        if facets.is_empty() {
            let _ = writeln!(out, "_none_");
        }
        for facet in facets {
            let mark = if facet.active { "x" } else { " " };
            let _ = writeln!(out, "- [{}] {} ({})", mark, facet.name, facet.count);
        }
        out.push('\n');
    }
    out
}

pub fn format_item(item: &CatalogItem) -> String {
    let mut out = format!("### {}\n\n", item.name);
    let _ = writeln!(out, "- id: {}", item.id);
    if let Some(brand) = item.brand() {
        let _ = writeln!(out, "- brand: {}", brand);
    }
    if let Some(tag) = item.tag() {
        let _ = writeln!(out, "- subcategory: {}", tag);
    }
    if let Some(clinic) = item.clinic() {
        let _ = writeln!(out, "- clinic: {}", clinic);
    }
    if let Some(price) = item.price {
        let _ = writeln!(out, "- price: {:.2}", price);
    }
    out.push('\n');
    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    change: Option<&'a FilterChange>,
    sort: SortKey,
    items: Vec<CatalogItem>,
}

/// Render the last notification and the visible items as pretty JSON
pub fn render_json_report(session: &FilterSession<RecordingListener>) -> serde_json::Result<String> {
    let report = JsonReport {
        change: session.listener().last(),
        sort: session.sort(),
        items: session.visible_items(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> FilterSession<RecordingListener> {
        let bundle: CatalogBundle = serde_json::from_value(json!({
            "products": [
                {"id": "1", "name": "Pienso", "brand": "Royal Canin", "subcategories": "Perros", "price": 40.0},
                {"id": "2", "name": "Arena", "brand": "Catsan", "subcategories": "Gatos", "price": 9.5}
            ],
            "categories": [{"categoryName": "Alimentos", "subcategories": ["Perros", "Gatos"]}]
        }))
        .unwrap();
        FilterSession::new(Mode::Products, bundle.catalogs, bundle.categories, RecordingListener::default())
    }

    #[test]
    fn test_format_item() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": "2", "name": "Arena", "brand": "Catsan", "price": 9.5
        }))
        .unwrap();
        assert_eq!(format_item(&item), "### Arena\n\n- id: 2\n- brand: Catsan\n- price: 9.50\n\n");
    }

    #[test]
    fn test_facet_groups_mark_active() {
        let mut s = session();
        s.toggle_facet(FacetGroupKey::Category, "Alimentos");
        s.toggle_facet(FacetGroupKey::Subcategories, "Gatos");

        let text = format_facet_groups(s.store().state());
        assert!(text.contains("- [x] Alimentos (2)"));
        assert!(text.contains("- [ ] Perros (1)"));
        assert!(text.contains("- [x] Gatos (1)"));
    }

    #[test]
    fn test_report_lists_filters_and_count() {
        let mut s = session();
        s.toggle_facet(FacetGroupKey::Brand, "Catsan");

        let text = render_report("catalog.json", &s, ReportOptions::default());
        assert!(text.starts_with("# catalog.json (products)\n"));
        assert!(text.contains("- **brand:** Catsan"));
        assert!(text.contains("**Matching Items:** 1"));
        assert!(text.contains("### Arena"));
        assert!(!text.contains("### Pienso"));
    }

    #[test]
    fn test_grouped_report() {
        let s = session();
        let options = ReportOptions {
            group_by: Some(FacetGroupKey::Brand),
            show_facets: false,
        };
        let text = render_report("catalog.json", &s, options);
        let catsan = text.find("## brand: Catsan").unwrap();
        let royal = text.find("## brand: Royal Canin").unwrap();
        assert!(catsan < royal);
    }

    #[test]
    fn test_json_report() {
        let s = session();
        let value: serde_json::Value = serde_json::from_str(&render_json_report(&s).unwrap()).unwrap();
        assert_eq!(value["change"]["totalCount"], 2);
        assert_eq!(value["sort"], "default");
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }
}
