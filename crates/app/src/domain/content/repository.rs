//! Content Repository

use bazaar::menu::MenuType;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    columns::{count_param, try_get_count},
    content::models::{
        AboutBrand, AboutBrandUuid, AboutPage, ContactInfo, ContactInfoUuid, ContactMessage,
        ContactMessageUuid, MenuItem, MenuItemUuid, NewAboutBrand, NewContactInfo,
        NewContactMessage, NewMenuItem, NewTeamMember, NewTestimonial, TeamMember,
        TeamMemberUuid, Testimonial, TestimonialUuid,
    },
};

const GET_ABOUT_PAGE_SQL: &str = include_str!("sql/get_about_page.sql");
const SAVE_ABOUT_PAGE_SQL: &str = include_str!("sql/save_about_page.sql");
const LIST_ABOUT_BRANDS_SQL: &str = include_str!("sql/list_about_brands.sql");
const CREATE_ABOUT_BRAND_SQL: &str = include_str!("sql/create_about_brand.sql");
const LIST_TEAM_MEMBERS_SQL: &str = include_str!("sql/list_team_members.sql");
const CREATE_TEAM_MEMBER_SQL: &str = include_str!("sql/create_team_member.sql");
const LIST_TESTIMONIALS_SQL: &str = include_str!("sql/list_testimonials.sql");
const CREATE_TESTIMONIAL_SQL: &str = include_str!("sql/create_testimonial.sql");
const GET_ACTIVE_CONTACT_INFO_SQL: &str = include_str!("sql/get_active_contact_info.sql");
const CREATE_CONTACT_INFO_SQL: &str = include_str!("sql/create_contact_info.sql");
const ACTIVATE_CONTACT_INFO_SQL: &str = include_str!("sql/activate_contact_info.sql");
const DEACTIVATE_OTHER_CONTACT_INFOS_SQL: &str =
    include_str!("sql/deactivate_other_contact_infos.sql");
const LOCK_CONTACT_INFOS_SQL: &str = include_str!("sql/lock_contact_infos.sql");
const CREATE_CONTACT_MESSAGE_SQL: &str = include_str!("sql/create_contact_message.sql");
const LIST_CONTACT_MESSAGES_SQL: &str = include_str!("sql/list_contact_messages.sql");
const MARK_CONTACT_MESSAGE_READ_SQL: &str = include_str!("sql/mark_contact_message_read.sql");
const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContentRepository;

impl PgContentRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_about_page(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<AboutPage>, sqlx::Error> {
        query_as::<Postgres, AboutPage>(GET_ABOUT_PAGE_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn save_about_page(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: &AboutPage,
    ) -> Result<AboutPage, sqlx::Error> {
        query_as::<Postgres, AboutPage>(SAVE_ABOUT_PAGE_SQL)
            .bind(&page.vision_title)
            .bind(&page.vision_description)
            .bind(&page.mission_title)
            .bind(&page.mission_description)
            .bind(&page.who_we_are_title)
            .bind(&page.who_we_are_subtitle)
            .bind(&page.who_we_are_description)
            .bind(&page.who_we_are_image_front)
            .bind(&page.who_we_are_image_back)
            .bind(&page.brands_title)
            .bind(&page.brands_description)
            .bind(&page.team_title)
            .bind(&page.testimonials_title)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_about_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<AboutBrand>, sqlx::Error> {
        query_as::<Postgres, AboutBrand>(LIST_ABOUT_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_about_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: &NewAboutBrand,
    ) -> Result<AboutBrand, sqlx::Error> {
        query_as::<Postgres, AboutBrand>(CREATE_ABOUT_BRAND_SQL)
            .bind(brand.uuid.into_uuid())
            .bind(&brand.name)
            .bind(&brand.logo_url)
            .bind(&brand.website)
            .bind(count_param(brand.order, "sort_order")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_team_members(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        query_as::<Postgres, TeamMember>(LIST_TEAM_MEMBERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_team_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        member: &NewTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        query_as::<Postgres, TeamMember>(CREATE_TEAM_MEMBER_SQL)
            .bind(member.uuid.into_uuid())
            .bind(&member.name)
            .bind(&member.position)
            .bind(&member.photo_url)
            .bind(&member.bio)
            .bind(&member.facebook_url)
            .bind(&member.twitter_url)
            .bind(&member.instagram_url)
            .bind(count_param(member.order, "sort_order")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_testimonials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        query_as::<Postgres, Testimonial>(LIST_TESTIMONIALS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_testimonial(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        testimonial: &NewTestimonial,
        customer_role: &str,
    ) -> Result<Testimonial, sqlx::Error> {
        query_as::<Postgres, Testimonial>(CREATE_TESTIMONIAL_SQL)
            .bind(testimonial.uuid.into_uuid())
            .bind(&testimonial.customer_name)
            .bind(customer_role)
            .bind(&testimonial.photo_url)
            .bind(&testimonial.review)
            .bind(count_param(testimonial.order, "sort_order")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_active_contact_info(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<ContactInfo>, sqlx::Error> {
        query_as::<Postgres, ContactInfo>(GET_ACTIVE_CONTACT_INFO_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Serialize activations against each other until the transaction ends.
    pub(crate) async fn lock_contact_infos(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_CONTACT_INFOS_SQL).execute(&mut **tx).await?;

        Ok(())
    }

    pub(crate) async fn create_contact_info(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        info: &NewContactInfo,
    ) -> Result<ContactInfo, sqlx::Error> {
        query_as::<Postgres, ContactInfo>(CREATE_CONTACT_INFO_SQL)
            .bind(info.uuid.into_uuid())
            .bind(&info.office_address)
            .bind(&info.email)
            .bind(&info.phone1)
            .bind(&info.phone2)
            .bind(&info.map_embed)
            .bind(&info.facebook_url)
            .bind(&info.twitter_url)
            .bind(&info.instagram_url)
            .bind(&info.youtube_url)
            .bind(&info.pinterest_url)
            .bind(info.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn activate_contact_info(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        info: ContactInfoUuid,
    ) -> Result<ContactInfo, sqlx::Error> {
        query_as::<Postgres, ContactInfo>(ACTIVATE_CONTACT_INFO_SQL)
            .bind(info.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Deactivate every active record except `keep`.
    pub(crate) async fn deactivate_other_contact_infos(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        keep: ContactInfoUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_OTHER_CONTACT_INFOS_SQL)
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_contact_message(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ContactMessageUuid,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        query_as::<Postgres, ContactMessage>(CREATE_CONTACT_MESSAGE_SQL)
            .bind(uuid.into_uuid())
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.phone)
            .bind(&message.subject)
            .bind(&message.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_contact_messages(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        query_as::<Postgres, ContactMessage>(LIST_CONTACT_MESSAGES_SQL)
            .bind(unread_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_contact_message_read(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        message: ContactMessageUuid,
    ) -> Result<ContactMessage, sqlx::Error> {
        query_as::<Postgres, ContactMessage>(MARK_CONTACT_MESSAGE_READ_SQL)
            .bind(message.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        menu_type: MenuType,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        query_as::<Postgres, MenuItem>(LIST_MENU_ITEMS_SQL)
            .bind(menu_type.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewMenuItem,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(CREATE_MENU_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.title)
            .bind(&item.url)
            .bind(item.parent.map(MenuItemUuid::into_uuid))
            .bind(i32::from(item.order))
            .bind(item.is_active)
            .bind(item.menu_type.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for AboutPage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            vision_title: row.try_get("vision_title")?,
            vision_description: row.try_get("vision_description")?,
            mission_title: row.try_get("mission_title")?,
            mission_description: row.try_get("mission_description")?,
            who_we_are_title: row.try_get("who_we_are_title")?,
            who_we_are_subtitle: row.try_get("who_we_are_subtitle")?,
            who_we_are_description: row.try_get("who_we_are_description")?,
            who_we_are_image_front: row.try_get("who_we_are_image_front")?,
            who_we_are_image_back: row.try_get("who_we_are_image_back")?,
            brands_title: row.try_get("brands_title")?,
            brands_description: row.try_get("brands_description")?,
            team_title: row.try_get("team_title")?,
            testimonials_title: row.try_get("testimonials_title")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AboutBrand {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AboutBrandUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            logo_url: row.try_get("logo_url")?,
            website: row.try_get("website")?,
            order: try_get_count(row, "sort_order")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TeamMember {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TeamMemberUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            position: row.try_get("position")?,
            photo_url: row.try_get("photo_url")?,
            bio: row.try_get("bio")?,
            facebook_url: row.try_get("facebook_url")?,
            twitter_url: row.try_get("twitter_url")?,
            instagram_url: row.try_get("instagram_url")?,
            order: try_get_count(row, "sort_order")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Testimonial {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TestimonialUuid::from_uuid(row.try_get("uuid")?),
            customer_name: row.try_get("customer_name")?,
            customer_role: row.try_get("customer_role")?,
            photo_url: row.try_get("photo_url")?,
            review: row.try_get("review")?,
            order: try_get_count(row, "sort_order")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ContactInfo {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ContactInfoUuid::from_uuid(row.try_get("uuid")?),
            office_address: row.try_get("office_address")?,
            email: row.try_get("email")?,
            phone1: row.try_get("phone1")?,
            phone2: row.try_get("phone2")?,
            map_embed: row.try_get("map_embed")?,
            facebook_url: row.try_get("facebook_url")?,
            twitter_url: row.try_get("twitter_url")?,
            instagram_url: row.try_get("instagram_url")?,
            youtube_url: row.try_get("youtube_url")?,
            pinterest_url: row.try_get("pinterest_url")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ContactMessage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ContactMessageUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            is_read: row.try_get("is_read")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let order: i32 = row.try_get("sort_order")?;
        let menu_type: String = row.try_get("menu_type")?;

        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            url: row.try_get("url")?,
            parent: row
                .try_get::<Option<Uuid>, _>("parent_uuid")?
                .map(MenuItemUuid::from_uuid),
            order: u16::try_from(order).map_err(|e| decode_error("sort_order", e))?,
            is_active: row.try_get("is_active")?,
            menu_type: menu_type
                .parse()
                .map_err(|e| decode_error("menu_type", e))?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
