use crate::domain::entities::SiteProfile;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const PRIMARY_NAVIGATION: [(&str, &str); 7] = [
    ("Home", "/"),
    ("Projects", "/projects"),
    ("How I Work", "/how-i-work"),
    ("Blog", "/blog"),
    ("Tutorials", "/tutorials"),
    ("About", "/about"),
    ("Contact", "/contact"),
];

/// Builds the layout chrome once from the site profile and hands out copies per request.
#[derive(Clone)]
pub struct ChromeService {
    chrome: LayoutChrome,
}

impl ChromeService {
    pub fn new(site: &SiteProfile) -> Self {
        Self {
            chrome: build_chrome(site),
        }
    }

    /// Chrome for the page titled `page_title`, highlighting the nav entry at `active_path`.
    pub fn layout(&self, page_title: &str, active_path: &str) -> LayoutChrome {
        self.chrome.clone().for_page(page_title, Some(active_path))
    }

    /// Chrome without an active navigation entry, used by error pages.
    pub fn base(&self) -> LayoutChrome {
        self.chrome.clone()
    }
}

fn build_chrome(site: &SiteProfile) -> LayoutChrome {
    let entries = PRIMARY_NAVIGATION
        .into_iter()
        .map(|(label, href)| NavigationLinkView {
            label: label.to_string(),
            href: href.to_string(),
            is_external: false,
            is_active: false,
        })
        .collect();

    let social = &site.social;
    let links = [
        ("GitHub", social.github.as_str()),
        ("LinkedIn", social.linkedin.as_str()),
        ("ThinkSense Labs", social.thinksenselabs.as_str()),
        ("Resume", social.resume_url.as_str()),
    ]
    .into_iter()
    .filter(|(_, url)| !url.trim().is_empty())
    .map(|(label, url)| NavigationLinkView {
        label: label.to_string(),
        href: url.to_string(),
        is_external: true,
        is_active: false,
    })
    .collect();

    LayoutChrome {
        brand: BrandView {
            title: site.name.clone(),
            href: "/".to_string(),
        },
        navigation: NavigationView { entries },
        footer: FooterView {
            copy: format!("{} · {}", site.name, site.tagline),
            email: site.email.clone(),
            links,
        },
        meta: PageMetaView {
            title: site.name.clone(),
            description: format!("{}. {}", site.role, site.tagline),
        },
    }
}
