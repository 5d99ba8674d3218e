//! Content service.

use async_trait::async_trait;
use bazaar::menu::{MAX_MENU_ORDER, MenuNode, MenuType, build_menu};
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::content::{
        errors::ContentServiceError,
        models::{
            AboutBrand, AboutPage, AboutView, ContactInfo, ContactInfoUuid, ContactMessage,
            ContactMessageUuid, DEFAULT_CUSTOMER_ROLE, MenuItem, NewAboutBrand, NewContactInfo,
            NewContactMessage, NewMenuItem, NewTeamMember, NewTestimonial, TeamMember,
            Testimonial,
        },
        repository::PgContentRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgContentService {
    db: Db,
    repository: PgContentRepository,
}

impl PgContentService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgContentRepository::new(),
        }
    }
}

#[async_trait]
impl ContentService for PgContentService {
    #[instrument(skip(self))]
    async fn about(&self) -> Result<AboutView, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let page = self
            .repository
            .get_about_page(&mut tx)
            .await?
            .unwrap_or_default();

        let brands = self.repository.list_about_brands(&mut tx).await?;
        let team = self.repository.list_team_members(&mut tx).await?;
        let testimonials = self.repository.list_testimonials(&mut tx).await?;

        tx.commit().await?;

        Ok(AboutView {
            page,
            brands,
            team,
            testimonials,
        })
    }

    #[instrument(skip(self, page))]
    async fn set_about(&self, page: AboutPage) -> Result<AboutPage, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let saved = self.repository.save_about_page(&mut tx, &page).await?;

        tx.commit().await?;

        Ok(saved)
    }

    #[instrument(skip(self, brand), fields(brand = %brand.uuid))]
    async fn add_about_brand(
        &self,
        brand: NewAboutBrand,
    ) -> Result<AboutBrand, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_about_brand(&mut tx, &brand).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self, member), fields(member = %member.uuid))]
    async fn add_team_member(
        &self,
        member: NewTeamMember,
    ) -> Result<TeamMember, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_team_member(&mut tx, &member).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self, testimonial), fields(testimonial = %testimonial.uuid))]
    async fn add_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, ContentServiceError> {
        let role = testimonial
            .customer_role
            .as_deref()
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_ROLE);

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_testimonial(&mut tx, &testimonial, role)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn contact_info(&self) -> Result<Option<ContactInfo>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let info = self.repository.get_active_contact_info(&mut tx).await?;

        tx.commit().await?;

        Ok(info)
    }

    #[instrument(skip(self, info), fields(info = %info.uuid, active = info.is_active))]
    async fn create_contact_info(
        &self,
        info: NewContactInfo,
    ) -> Result<ContactInfo, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        if info.is_active {
            self.repository.lock_contact_infos(&mut tx).await?;
            self.repository
                .deactivate_other_contact_infos(&mut tx, info.uuid)
                .await?;
        }

        let created = self.repository.create_contact_info(&mut tx, &info).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn activate_contact_info(
        &self,
        info: ContactInfoUuid,
    ) -> Result<ContactInfo, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_contact_infos(&mut tx).await?;

        let deactivated = self
            .repository
            .deactivate_other_contact_infos(&mut tx, info)
            .await?;

        let activated = self.repository.activate_contact_info(&mut tx, info).await?;

        tx.commit().await?;

        info!(deactivated, "contact info activated");

        Ok(activated)
    }

    #[instrument(skip(self, message))]
    async fn submit_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, ContentServiceError> {
        let message = message.cleaned().ok_or(ContentServiceError::InvalidMessage)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .create_contact_message(&mut tx, ContactMessageUuid::new(), &message)
            .await?;

        tx.commit().await?;

        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_messages(
        &self,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let messages = self
            .repository
            .list_contact_messages(&mut tx, unread_only)
            .await?;

        tx.commit().await?;

        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn mark_message_read(
        &self,
        message: ContactMessageUuid,
    ) -> Result<ContactMessage, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let read = self
            .repository
            .mark_contact_message_read(&mut tx, message)
            .await?;

        tx.commit().await?;

        Ok(read)
    }

    #[instrument(skip(self))]
    async fn menu(&self, menu_type: MenuType) -> Result<Vec<MenuNode>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_menu_items(&mut tx, menu_type).await?;

        tx.commit().await?;

        let entries: Vec<_> = items.iter().map(MenuItem::to_entry).collect();

        Ok(build_menu(&entries, menu_type))
    }

    #[instrument(skip(self, item), fields(item = %item.uuid, menu_type = %item.menu_type.as_str()))]
    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, ContentServiceError> {
        if item.order > MAX_MENU_ORDER {
            return Err(ContentServiceError::InvalidMenuOrder {
                max: MAX_MENU_ORDER,
            });
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_menu_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// About page settings with its active brands, team and testimonials.
    async fn about(&self) -> Result<AboutView, ContentServiceError>;

    /// Replace the about page settings.
    async fn set_about(&self, page: AboutPage) -> Result<AboutPage, ContentServiceError>;

    async fn add_about_brand(&self, brand: NewAboutBrand)
    -> Result<AboutBrand, ContentServiceError>;

    async fn add_team_member(
        &self,
        member: NewTeamMember,
    ) -> Result<TeamMember, ContentServiceError>;

    async fn add_testimonial(
        &self,
        testimonial: NewTestimonial,
    ) -> Result<Testimonial, ContentServiceError>;

    /// The active contact details, if any.
    async fn contact_info(&self) -> Result<Option<ContactInfo>, ContentServiceError>;

    /// Store contact details. An active record replaces the previously active one.
    async fn create_contact_info(
        &self,
        info: NewContactInfo,
    ) -> Result<ContactInfo, ContentServiceError>;

    /// Make `info` the only active record.
    async fn activate_contact_info(
        &self,
        info: ContactInfoUuid,
    ) -> Result<ContactInfo, ContentServiceError>;

    async fn submit_message(
        &self,
        message: NewContactMessage,
    ) -> Result<ContactMessage, ContentServiceError>;

    /// Messages, newest first.
    async fn list_messages(
        &self,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>, ContentServiceError>;

    async fn mark_message_read(
        &self,
        message: ContactMessageUuid,
    ) -> Result<ContactMessage, ContentServiceError>;

    /// The active tree for `menu_type`.
    async fn menu(&self, menu_type: MenuType) -> Result<Vec<MenuNode>, ContentServiceError>;

    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, ContentServiceError>;
}
