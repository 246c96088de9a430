use std::io::Write;

use minijinja::{context, Environment};
use serde::Serialize;

use crate::{
    callback::encode,
    config::PageLayout,
    error::{Error, Result},
    options::ChartSpec,
    theme::Theme,
};

const ENGINE_ASSET: &str = "echarts.min.js";
const PAGE_TEMPLATE_NAME: &str = "page.html";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
{%- for asset in assets %}
    <script src="{{ asset }}"></script>
{%- endfor %}
    <style>
        body { margin: 0; background-color: {{ background }}; }
        .layout { display: grid; grid-template-columns: {{ columns }}; grid-template-rows: {{ rows }}; }
        .top, .bottom { grid-column: 1 / 4; }
    </style>
</head>
<body>
<div class="layout">
    <div class="top">{{ layout.top_content|safe }}</div>
    <div class="left">{{ layout.left_content|safe }}</div>
    <div class="center">
{%- for chart in charts %}
        <div id="{{ chart.id }}" style="width:{{ chart.width }}px;height:{{ chart.height }}px;"></div>
{%- endfor %}
    </div>
    <div class="right">{{ layout.right_content|safe }}</div>
    <div class="bottom">{{ layout.bottom_content|safe }}</div>
</div>
<script type="text/javascript">
    "use strict";
{%- for chart in charts %}
    let {{ chart.id }} = echarts.init(document.getElementById("{{ chart.id }}"), "{{ chart.theme }}", { renderer: "canvas" });
    {{ chart.id }}.setOption({{ chart.options|safe }});
{%- endfor %}
{%- for script in scripts %}
    {{ script|safe }}
{%- endfor %}
</script>
</body>
</html>
"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PageChart {
    id: String,
    theme: &'static str,
    width: i32,
    height: i32,
    /// option object with callbacks inlined
    options: String,
}

/// An HTML document hosting one or more charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    title: String,
    assets_host: String,
    background: String,
    layout: PageLayout,
    assets: Vec<String>,
    charts: Vec<PageChart>,
    scripts: Vec<String>,
}

impl Page {
    pub fn new(assets_host: impl Into<String>) -> Self {
        Self {
            title: "TA Chart".to_string(),
            assets_host: assets_host.into(),
            background: Theme::default().page_background().to_string(),
            layout: PageLayout::default(),
            assets: Vec::new(),
            charts: Vec::new(),
            scripts: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Adds a chart drawn with `theme` and registers the scripts it needs.
    pub fn add_chart(
        mut self,
        spec: &ChartSpec,
        theme: Theme,
        width: i32,
        height: i32,
    ) -> Result<Self> {
        self.add_asset(ENGINE_ASSET.to_string());
        if let Some(asset) = theme.asset() {
            self.add_asset(asset);
        }

        // chart text must not close the page script element
        let options = encode(spec)?.replace("</", "<\\/");
        self.charts.push(PageChart {
            id: format!("chart_{}", self.charts.len()),
            theme: theme.name(),
            width,
            height,
            options,
        });
        Ok(self)
    }

    pub fn add_scripts(mut self, scripts: impl IntoIterator<Item = String>) -> Self {
        self.scripts.extend(scripts);
        self
    }

    fn add_asset(&mut self, asset: String) {
        if !self.assets.contains(&asset) {
            self.assets.push(asset);
        }
    }

    /// Script URLs of the page, relative assets joined to the asset host.
    pub fn resolve_assets(&self) -> Result<Vec<String>> {
        self.assets
            .iter()
            .map(|asset| resolve_asset(&self.assets_host, asset))
            .collect()
    }

    pub fn render<W: Write>(&self, mut writer: W) -> Result<()> {
        let assets = self.resolve_assets()?;

        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        let html = env.get_template(PAGE_TEMPLATE_NAME)?.render(context! {
            title => self.title,
            assets => assets,
            background => self.background,
            columns => format!(
                "{}px {}px {}px",
                self.layout.left_width, self.layout.chart_width, self.layout.right_width
            ),
            rows => format!("{}px auto {}px", self.layout.top_height, self.layout.bottom_height),
            layout => self.layout,
            charts => self.charts,
            scripts => self.scripts,
        })?;

        writer.write_all(html.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn is_absolute(asset: &str) -> bool {
    ["http://", "https://", "//"]
        .iter()
        .any(|scheme| asset.starts_with(scheme))
}

fn resolve_asset(host: &str, asset: &str) -> Result<String> {
    if is_absolute(asset) {
        return Ok(asset.to_string());
    }
    if !is_absolute(host) && !host.starts_with('/') && !host.starts_with("./") {
        return Err(Error::AssetResolution {
            asset: asset.to_string(),
            host: host.to_string(),
        });
    }

    if host.ends_with('/') {
        Ok(format!("{}{}", host, asset))
    } else {
        Ok(format!("{}/{}", host, asset))
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_asset, Page};
    use crate::{config::PageLayout, error::Error, theme::Theme};

    #[test]
    fn resolves_against_host() {
        assert_eq!(
            resolve_asset("https://cdn.example.com/assets", "echarts.min.js").unwrap(),
            "https://cdn.example.com/assets/echarts.min.js"
        );
        assert_eq!(
            resolve_asset("./assets/", "themes/dark.js").unwrap(),
            "./assets/themes/dark.js"
        );
        assert_eq!(
            resolve_asset("", "https://cdn.example.com/echarts.min.js").unwrap(),
            "https://cdn.example.com/echarts.min.js"
        );
        assert!(matches!(
            resolve_asset("", "echarts.min.js"),
            Err(Error::AssetResolution { asset, .. }) if asset == "echarts.min.js"
        ));
    }

    #[test]
    fn assets_are_deduplicated() {
        let spec = crate::chart::tests::sample_spec();
        let page = Page::new("https://cdn.example.com/")
            .add_chart(&spec, Theme::Vintage, 800, 600)
            .unwrap()
            .add_chart(&spec, Theme::Vintage, 800, 600)
            .unwrap();

        assert_eq!(
            page.resolve_assets().unwrap(),
            vec![
                "https://cdn.example.com/echarts.min.js",
                "https://cdn.example.com/themes/vintage.js",
            ]
        );
    }

    #[test]
    fn renders_layout() {
        let spec = crate::chart::tests::sample_spec();
        let layout = PageLayout {
            chart_width: 800,
            top_height: 40,
            left_width: 120,
            top_content: "<h1>BTC/USDT</h1>".to_string(),
            ..Default::default()
        };
        let page = Page::new("https://cdn.example.com/")
            .layout(layout)
            .background_color("#FEF8EF")
            .add_chart(&spec, Theme::White, 800, 600)
            .unwrap()
            .add_scripts(vec!["console.log('ready');".to_string()]);

        let mut out = Vec::new();
        page.render(&mut out).unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.contains("<h1>BTC/USDT</h1>"));
        assert!(html.contains("grid-template-columns: 120px 800px 0px;"));
        assert!(html.contains("grid-template-rows: 40px auto 0px;"));
        assert!(html.contains("background-color: #FEF8EF;"));
        assert!(html.contains(
            r#"<script src="https:&#x2f;&#x2f;cdn.example.com&#x2f;echarts.min.js"></script>"#
        ));
        assert!(html.contains(r#"echarts.init(document.getElementById("chart_0"), "white""#));
        assert!(html.contains("console.log('ready');"));
        assert!(!html.contains("__tachart_fn"));
    }

    #[test]
    fn chart_text_cannot_close_the_script() {
        let mut spec = crate::chart::tests::sample_spec();
        spec.x_axis[0].data[0] = "x</script><b>".to_string();
        spec.title[0].text = "</script>".to_string();

        let mut out = Vec::new();
        Page::new("https://cdn.example.com/")
            .add_chart(&spec, Theme::White, 800, 600)
            .unwrap()
            .render(&mut out)
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        // one for the engine asset, one for the inline script
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains(r#""x<\/script><b>""#));
    }

    #[test]
    fn asset_host_is_escaped() {
        let spec = crate::chart::tests::sample_spec();
        let page = Page::new(r#"https://cdn.example.com/" onload="alert(1)"#)
            .add_chart(&spec, Theme::White, 800, 600)
            .unwrap();

        let mut out = Vec::new();
        page.render(&mut out).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(!html.contains(r#"" onload=""#));
        assert!(html.contains("&quot; onload=&quot;alert(1)"));
    }

    #[test]
    fn unresolved_asset_writes_nothing() {
        let spec = crate::chart::tests::sample_spec();
        let page = Page::new("").add_chart(&spec, Theme::White, 800, 600).unwrap();

        let mut out = Vec::new();
        assert!(matches!(page.render(&mut out), Err(Error::AssetResolution { .. })));
        assert!(out.is_empty());
    }
}
