//! Browser bindings: `web-sys` implementations of the host traits and the
//! WASM entry point that wires both controllers to page events.
//!
//! Only compiled with the `hydrate` feature.
//!
//! Pages wire the notice's accept button by giving it a
//! `data-cookie-accept` attribute. `acceptCookies` is also exported, but as
//! an ES-module export it is only reachable from module scripts that import
//! it, not from inline `onclick` attributes.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, MediaQueryList, Storage, Window};

use crate::config::{SiteConfig, ThemeConfig};
use crate::consent::ConsentNotice;
use crate::consts::{CONFIG_ELEMENT_ID, NOTICE_ACCEPT_ATTRIBUTE};
use crate::error::HostError;
use crate::host::{ColorScheme, CookieJar, Dom, KeyValueStore, Timers};
use crate::theme::ThemeController;

type BrowserNotice = ConsentNotice<BrowserCookies, BrowserDom, GlooTimers>;
type BrowserTheme = ThemeController<BrowserStorage, Rc<BrowserDom>>;

thread_local! {
    static NOTICE: RefCell<Option<Rc<BrowserNotice>>> = const { RefCell::new(None) };
}

fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

fn window() -> Result<Window, HostError> {
    web_sys::window().ok_or(HostError::NoDocument)
}

// =============================================================
// DOM
// =============================================================

pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    /// # Errors
    ///
    /// Returns [`HostError::NoDocument`] outside a page context.
    pub fn from_window() -> Result<Self, HostError> {
        let document = window()?.document().ok_or(HostError::NoDocument)?;
        Ok(Self { document })
    }

    fn element(&self, element_id: &str) -> Result<Element, HostError> {
        self.document
            .get_element_by_id(element_id)
            .ok_or_else(|| HostError::MissingElement(element_id.to_owned()))
    }

    fn root(&self) -> Result<Element, HostError> {
        self.document.document_element().ok_or(HostError::NoDocument)
    }

    fn members(&self, group: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(group);
        (0..collection.length()).filter_map(|i| collection.item(i)).collect()
    }
}

impl Dom for BrowserDom {
    fn add_class(&self, element_id: &str, class: &str) -> Result<(), HostError> {
        self.element(element_id)?
            .class_list()
            .add_1(class)
            .map_err(|e| HostError::Dom(js_error(&e)))
    }

    fn hide(&self, element_id: &str) -> Result<(), HostError> {
        let element = self.element(element_id)?;
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            return Err(HostError::Dom(format!("#{element_id} is not an HTML element")));
        };
        html.style()
            .set_property("display", "none")
            .map_err(|e| HostError::Dom(js_error(&e)))
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.root()?
            .set_attribute(name, value)
            .map_err(|e| HostError::Dom(js_error(&e)))
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn group_values(&self, group: &str, attribute: &str) -> Vec<Option<String>> {
        self.members(group).iter().map(|el| el.get_attribute(attribute)).collect()
    }

    fn set_group_class(&self, group: &str, index: usize, class: &str, on: bool) -> Result<(), HostError> {
        let member = self
            .members(group)
            .into_iter()
            .nth(index)
            .ok_or_else(|| HostError::MissingMember { group: group.to_owned(), index })?;
        let class_list = member.class_list();
        let result = if on { class_list.add_1(class) } else { class_list.remove_1(class) };
        result.map_err(|e| HostError::Dom(js_error(&e)))
    }
}

// =============================================================
// Cookies, storage, timers, media query
// =============================================================

pub struct BrowserCookies {
    document: HtmlDocument,
}

impl BrowserCookies {
    /// # Errors
    ///
    /// Returns [`HostError::NoDocument`] outside an HTML page.
    pub fn from_window() -> Result<Self, HostError> {
        let document = window()?
            .document()
            .ok_or(HostError::NoDocument)?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| HostError::NoDocument)?;
        Ok(Self { document })
    }
}

impl CookieJar for BrowserCookies {
    fn cookies(&self) -> String {
        match self.document.cookie() {
            Ok(cookies) => cookies,
            Err(e) => {
                log::warn!("cookie read: {}", js_error(&e));
                String::new()
            }
        }
    }

    fn write(&self, record: &str) -> Result<(), HostError> {
        self.document
            .set_cookie(record)
            .map_err(|e| HostError::Cookie(js_error(&e)))
    }
}

pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<Storage, HostError> {
        window()?
            .local_storage()
            .map_err(|e| HostError::Storage(js_error(&e)))?
            .ok_or_else(|| HostError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, HostError> {
        Self::storage()?.get_item(key).map_err(|e| HostError::Storage(js_error(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HostError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| HostError::Storage(js_error(&e)))
    }
}

pub struct GlooTimers;

impl Timers for GlooTimers {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, task).forget();
    }
}

pub struct MediaScheme {
    query: Option<MediaQueryList>,
}

impl MediaScheme {
    pub fn new(query: &str) -> Self {
        let query = match window().map(|w| w.match_media(query)) {
            Ok(Ok(list)) => list,
            Ok(Err(e)) => {
                log::warn!("matchMedia({query}): {}", js_error(&e));
                None
            }
            Err(e) => {
                log::warn!("matchMedia({query}): {e}");
                None
            }
        };
        Self { query }
    }

    /// Call `handler` on every preference change.
    fn on_change(&self, handler: impl FnMut() + 'static) {
        let Some(query) = &self.query else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(handler);
        if let Err(e) = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            log::warn!("color scheme listener: {}", js_error(&e));
        }
        closure.forget();
    }
}

impl ColorScheme for MediaScheme {
    fn prefers_dark(&self) -> bool {
        self.query.as_ref().is_some_and(MediaQueryList::matches)
    }
}

// =============================================================
// Wiring
// =============================================================

/// Read the page's JSON config block, falling back to defaults.
fn load_config(document: &Document) -> SiteConfig {
    let Some(json) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("#{CONFIG_ELEMENT_ID}: {e}; using defaults");
            SiteConfig::default()
        }
    }
}

fn listen(target: &web_sys::EventTarget, event: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("{event} listener: {}", js_error(&e));
    }
    closure.forget();
}

fn mount_theme(config: ThemeConfig, dom: Rc<BrowserDom>) {
    let scheme = MediaScheme::new(&config.dark_query);
    let members = dom.members(&config.button_class);
    let attribute = config.button_attribute.clone();
    let controller = Rc::new(BrowserTheme::new(config, BrowserStorage, Rc::clone(&dom)));
    controller.init();

    for button in members {
        let controller = Rc::clone(&controller);
        let attribute = attribute.clone();
        let target = button.clone();
        listen(&target, "click", move || {
            controller.on_button_click(button.get_attribute(&attribute).as_deref());
        });
    }

    scheme.on_change(move || controller.on_system_change());
}

fn mount_notice(notice: Rc<BrowserNotice>, dom: &BrowserDom, element_id: &str) {
    notice.on_ready();

    let accept_button = dom
        .element(element_id)
        .map(|el| el.query_selector(&format!("[{NOTICE_ACCEPT_ATTRIBUTE}]")));
    if let Ok(Ok(Some(button))) = accept_button {
        listen(&button, "click", move || notice.accept());
    }
}

/// Accept the cookie notice from JS (`import { acceptCookies } from ...`).
#[wasm_bindgen(js_name = acceptCookies)]
pub fn accept_cookies() {
    let notice = NOTICE.with(|slot| slot.borrow().clone());
    match notice {
        Some(notice) => notice.accept(),
        None => log::warn!("acceptCookies called before the notice was mounted"),
    }
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"site-prefs: logger already installed".into());
    }

    let dom = match BrowserDom::from_window() {
        Ok(dom) => Rc::new(dom),
        Err(e) => {
            log::warn!("site-prefs disabled: {e}");
            return;
        }
    };
    let config = load_config(&dom.document);

    mount_theme(config.theme, Rc::clone(&dom));

    let cookies = match BrowserCookies::from_window() {
        Ok(cookies) => cookies,
        Err(e) => {
            log::warn!("cookie notice disabled: {e}");
            return;
        }
    };
    let element_id = config.notice.element_id.clone();
    let notice = Rc::new(BrowserNotice::new(config.notice, cookies, Rc::clone(&dom), GlooTimers));
    NOTICE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&notice)));

    if dom.document.ready_state() == "loading" {
        let document = dom.document.clone();
        let ready = Closure::once_into_js(move || mount_notice(notice, &dom, &element_id));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref()) {
            log::warn!("DOMContentLoaded listener: {}", js_error(&e));
        }
    } else {
        mount_notice(notice, &dom, &element_id);
    }
}
