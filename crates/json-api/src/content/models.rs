//! Content response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar::menu::MenuNode;
use bazaar_app::domain::content::models::{
    AboutBrand, AboutPage, AboutView, ContactInfo, TeamMember, Testimonial,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AboutPageResponse {
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

impl From<AboutPage> for AboutPageResponse {
    fn from(page: AboutPage) -> Self {
        Self {
            vision_title: page.vision_title,
            vision_description: page.vision_description,
            mission_title: page.mission_title,
            mission_description: page.mission_description,
            who_we_are_title: page.who_we_are_title,
            who_we_are_subtitle: page.who_we_are_subtitle,
            who_we_are_description: page.who_we_are_description,
            who_we_are_image_front: page.who_we_are_image_front,
            who_we_are_image_back: page.who_we_are_image_back,
            brands_title: page.brands_title,
            brands_description: page.brands_description,
            team_title: page.team_title,
            testimonials_title: page.testimonials_title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AboutBrandResponse {
    pub uuid: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: String,
}

impl From<AboutBrand> for AboutBrandResponse {
    fn from(brand: AboutBrand) -> Self {
        Self {
            uuid: brand.uuid.into(),
            name: brand.name,
            logo_url: brand.logo_url,
            website: brand.website,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamMemberResponse {
    pub uuid: Uuid,
    pub name: String,
    pub position: String,
    pub photo_url: Option<String>,
    pub bio: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            uuid: member.uuid.into(),
            name: member.name,
            position: member.position,
            photo_url: member.photo_url,
            bio: member.bio,
            facebook_url: member.facebook_url,
            twitter_url: member.twitter_url,
            instagram_url: member.instagram_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TestimonialResponse {
    pub uuid: Uuid,
    pub customer_name: String,
    pub customer_role: String,
    pub photo_url: Option<String>,
    pub review: String,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(testimonial: Testimonial) -> Self {
        Self {
            uuid: testimonial.uuid.into(),
            customer_name: testimonial.customer_name,
            customer_role: testimonial.customer_role,
            photo_url: testimonial.photo_url,
            review: testimonial.review,
        }
    }
}

/// About page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AboutResponse {
    pub page: AboutPageResponse,
    pub brands: Vec<AboutBrandResponse>,
    pub team: Vec<TeamMemberResponse>,
    pub testimonials: Vec<TestimonialResponse>,
}

impl From<AboutView> for AboutResponse {
    fn from(view: AboutView) -> Self {
        Self {
            page: view.page.into(),
            brands: view.brands.into_iter().map(Into::into).collect(),
            team: view.team.into_iter().map(Into::into).collect(),
            testimonials: view.testimonials.into_iter().map(Into::into).collect(),
        }
    }
}

/// Active contact details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactInfoResponse {
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
}

impl From<ContactInfo> for ContactInfoResponse {
    fn from(info: ContactInfo) -> Self {
        Self {
            office_address: info.office_address,
            email: info.email,
            phone1: info.phone1,
            phone2: info.phone2,
            map_embed: info.map_embed,
            facebook_url: info.facebook_url,
            twitter_url: info.twitter_url,
            instagram_url: info.instagram_url,
            youtube_url: info.youtube_url,
            pinterest_url: info.pinterest_url,
        }
    }
}

/// Menu link with its children
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuNodeResponse {
    pub title: String,
    pub url: String,

    /// Nested menu nodes
    #[salvo(schema(value_type = Vec<Object>))]
    pub children: Vec<MenuNodeResponse>,
}

impl From<MenuNode> for MenuNodeResponse {
    fn from(node: MenuNode) -> Self {
        Self {
            title: node.title,
            url: node.url,
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}
