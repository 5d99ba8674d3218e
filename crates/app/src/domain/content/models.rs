//! Content Models

use bazaar::menu::{MenuEntry, MenuType};
use jiff::Timestamp;

use crate::{notices::Notice, uuids::TypedUuid};

pub type AboutBrandUuid = TypedUuid<AboutBrand>;
pub type TeamMemberUuid = TypedUuid<TeamMember>;
pub type TestimonialUuid = TypedUuid<Testimonial>;
pub type ContactInfoUuid = TypedUuid<ContactInfo>;
pub type ContactMessageUuid = TypedUuid<ContactMessage>;
pub type MenuItemUuid = TypedUuid<MenuItem>;

/// Role shown for testimonials that do not name one.
pub const DEFAULT_CUSTOMER_ROLE: &str = "مشتری";

/// About page settings. A single record exists; until it is saved the defaults are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutPage {
    pub vision_title: String,
    pub vision_description: String,
    pub mission_title: String,
    pub mission_description: String,
    pub who_we_are_title: String,
    pub who_we_are_subtitle: String,
    pub who_we_are_description: String,
    pub who_we_are_image_front: Option<String>,
    pub who_we_are_image_back: Option<String>,
    pub brands_title: String,
    pub brands_description: String,
    pub team_title: String,
    pub testimonials_title: String,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            vision_title: "دید ما".to_string(),
            vision_description: String::new(),
            mission_title: "ماموریت ما".to_string(),
            mission_description: String::new(),
            who_we_are_title: "ما چه کسانی هستیم".to_string(),
            who_we_are_subtitle: String::new(),
            who_we_are_description: String::new(),
            who_we_are_image_front: None,
            who_we_are_image_back: None,
            brands_title: "برند های معروفی که با ما در حال همکاری هستند.".to_string(),
            brands_description: String::new(),
            team_title: "آشنایی با تیم ما".to_string(),
            testimonials_title: "نظرات مشتری های فروشگاه".to_string(),
        }
    }
}

/// Partner brand shown on the about page.
#[derive(Debug, Clone)]
pub struct AboutBrand {
    pub uuid: AboutBrandUuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: String,
    pub order: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewAboutBrand {
    pub uuid: AboutBrandUuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: String,
    pub order: u32,
}

#[derive(Debug, Clone)]
pub struct TeamMember {
    pub uuid: TeamMemberUuid,
    pub name: String,
    pub position: String,
    pub photo_url: Option<String>,
    pub bio: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub order: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub uuid: TeamMemberUuid,
    pub name: String,
    pub position: String,
    pub photo_url: Option<String>,
    pub bio: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub order: u32,
}

#[derive(Debug, Clone)]
pub struct Testimonial {
    pub uuid: TestimonialUuid,
    pub customer_name: String,
    pub customer_role: String,
    pub photo_url: Option<String>,
    pub review: String,
    pub order: u32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub uuid: TestimonialUuid,
    pub customer_name: String,

    /// Defaults to [`DEFAULT_CUSTOMER_ROLE`].
    pub customer_role: Option<String>,
    pub photo_url: Option<String>,
    pub review: String,
    pub order: u32,
}

/// Everything rendered on the about page.
#[derive(Debug, Clone)]
pub struct AboutView {
    pub page: AboutPage,
    pub brands: Vec<AboutBrand>,
    pub team: Vec<TeamMember>,
    pub testimonials: Vec<Testimonial>,
}

/// Store contact details. At most one record is active.
#[derive(Debug, Clone)]
pub struct ContactInfo {
    pub uuid: ContactInfoUuid,
    pub office_address: String,
    pub email: String,
    pub phone1: String,
    pub phone2: Option<String>,
    pub map_embed: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub pinterest_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewContactInfo {
    pub uuid: ContactInfoUuid,
    pub office_address: String,
    pub email: String,
    pub phone1: String,
    pub phone2: Option<String>,
    pub map_embed: String,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub youtube_url: Option<String>,
    pub pinterest_url: Option<String>,
    pub is_active: bool,
}

/// A visitor's message from the contact form.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub uuid: ContactMessageUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl ContactMessage {
    /// Acknowledgement shown to the sender.
    #[must_use]
    pub fn receipt() -> Notice {
        Notice::success("پیام شما با موفقیت ارسال شد. به زودی با شما تماس خواهیم گرفت.")
    }
}

/// Contact form submission.
#[derive(Debug, Clone, Default)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    /// Trimmed copy, with blank optional fields cleared, or `None` when a required field is
    /// missing or the email is malformed.
    #[must_use]
    pub fn cleaned(&self) -> Option<Self> {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
        };

        let cleaned = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            subject: optional(&self.subject),
            message: self.message.trim().to_string(),
        };

        let email_ok = cleaned
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

        (!cleaned.name.is_empty() && !cleaned.message.is_empty() && email_ok).then_some(cleaned)
    }
}

/// A stored navigation entry.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub uuid: MenuItemUuid,
    pub title: String,
    pub url: Option<String>,
    pub parent: Option<MenuItemUuid>,
    pub order: u16,
    pub is_active: bool,
    pub menu_type: MenuType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MenuItem {
    #[must_use]
    pub fn to_entry(&self) -> MenuEntry {
        MenuEntry {
            uuid: self.uuid.into_uuid(),
            parent: self.parent.map(MenuItemUuid::into_uuid),
            title: self.title.clone(),
            url: self.url.clone(),
            order: self.order,
            is_active: self.is_active,
            menu_type: self.menu_type,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub title: String,
    pub url: Option<String>,
    pub parent: Option<MenuItemUuid>,
    pub order: u16,
    pub is_active: bool,
    pub menu_type: MenuType,
}
