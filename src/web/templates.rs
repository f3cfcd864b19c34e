use askama::Template;

use crate::db::Record;
use crate::models::{
    Activity, Banner, CustomPage, FinancialRecord, FinancialSummary, GalleryImage,
    HistoryContent, Member, MemberStatus, MemberType, Promotion, WebsiteSettings,
};
use crate::web::notice::Notice;

/// Site-wide data every public page renders around its content.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub settings: WebsiteSettings,
    pub nav_pages: Vec<Record<CustomPage>>,
}

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub banners: Vec<Record<Banner>>,
    pub promotions: Vec<Record<Promotion>>,
    pub activities: Vec<Record<Activity>>,
}

#[derive(Template)]
#[template(path = "public/about.html")]
pub struct AboutTemplate {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "public/gallery.html")]
pub struct GalleryTemplate {
    pub chrome: Chrome,
    pub images: Vec<Record<GalleryImage>>,
}

#[derive(Template)]
#[template(path = "public/members.html")]
pub struct MembersTemplate {
    pub chrome: Chrome,
    pub members: Vec<Record<Member>>,
}

#[derive(Template)]
#[template(path = "public/history.html")]
pub struct HistoryTemplate {
    pub chrome: Chrome,
    pub history: HistoryContent,
}

#[derive(Template)]
#[template(path = "public/prayer.html")]
pub struct PrayerTemplate {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "public/page.html")]
pub struct CustomPageTemplate {
    pub chrome: Chrome,
    pub page: Record<CustomPage>,
}

#[derive(Template)]
#[template(path = "public/not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "public/maintenance.html")]
pub struct MaintenanceTemplate {
    pub chrome: Chrome,
}

#[derive(Template)]
#[template(path = "public/register_choose.html")]
pub struct RegisterChooseTemplate {
    pub chrome: Chrome,
    pub types: [MemberType; 3],
    pub success: bool,
}

#[derive(Template)]
#[template(path = "public/register_form.html")]
pub struct RegisterFormTemplate {
    pub chrome: Chrome,
    pub member: Member,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

/// A member line in the admin list, flagged when its email is shared.
#[derive(Debug, Clone)]
pub struct MemberRow {
    pub member: Record<Member>,
    pub duplicate: bool,
}

#[derive(Template)]
#[template(path = "admin/members.html")]
pub struct AdminMembersTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub rows: Vec<MemberRow>,
    pub total: usize,
    pub q: String,
    pub member_type: String,
    pub status: String,
    pub types: [MemberType; 3],
    pub statuses: [MemberStatus; 2],
}

#[derive(Template)]
#[template(path = "admin/rows/member_row.html")]
pub struct MemberRowTemplate {
    pub row: MemberRow,
}

#[derive(Template)]
#[template(path = "admin/member_detail.html")]
pub struct AdminMemberDetailTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub member: Record<Member>,
}

impl AdminMemberDetailTemplate {
    pub fn new(member: Record<Member>, notice: Option<Notice>) -> Self {
        Self {
            tab: "members",
            notice,
            member,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/financial.html")]
pub struct AdminFinancialTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub records: Vec<Record<FinancialRecord>>,
    pub summary: FinancialSummary,
    pub currency: &'static str,
    pub today: String,
}

#[derive(Template)]
#[template(path = "admin/rows/financial_row.html")]
pub struct FinancialRowTemplate {
    pub record: Record<FinancialRecord>,
}

#[derive(Template)]
#[template(path = "admin/rows/financial_summary.html")]
pub struct FinancialSummaryTemplate {
    pub summary: FinancialSummary,
    pub currency: &'static str,
    pub oob: bool,
}

#[derive(Template)]
#[template(path = "admin/cms_settings.html")]
pub struct CmsSettingsTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub settings: WebsiteSettings,
}

#[derive(Template)]
#[template(path = "admin/cms_banners.html")]
pub struct CmsBannersTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub banners: Vec<Record<Banner>>,
}

#[derive(Template)]
#[template(path = "admin/rows/banner_row.html")]
pub struct BannerRowTemplate {
    pub banner: Record<Banner>,
}

/// A custom page line in the admin list, flagged when its slug is shared.
#[derive(Debug, Clone)]
pub struct PageRow {
    pub page: Record<CustomPage>,
    pub duplicate: bool,
}

#[derive(Template)]
#[template(path = "admin/cms_pages.html")]
pub struct CmsPagesTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub rows: Vec<PageRow>,
}

#[derive(Template)]
#[template(path = "admin/rows/page_row.html")]
pub struct PageRowTemplate {
    pub row: PageRow,
}

#[derive(Template)]
#[template(path = "admin/cms_activities.html")]
pub struct CmsActivitiesTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub activities: Vec<Record<Activity>>,
}

#[derive(Template)]
#[template(path = "admin/rows/activity_row.html")]
pub struct ActivityRowTemplate {
    pub activity: Record<Activity>,
}

#[derive(Template)]
#[template(path = "admin/cms_promotions.html")]
pub struct CmsPromotionsTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub promotions: Vec<Record<Promotion>>,
}

#[derive(Template)]
#[template(path = "admin/rows/promotion_row.html")]
pub struct PromotionRowTemplate {
    pub promotion: Record<Promotion>,
}

#[derive(Template)]
#[template(path = "admin/cms_history.html")]
pub struct CmsHistoryTemplate {
    pub tab: &'static str,
    pub notice: Option<Notice>,
    pub history: HistoryContent,
}

/// Out-of-band replacement for the notice area of an admin page.
#[derive(Template)]
#[template(path = "admin/notice_oob.html")]
pub struct NoticeOobTemplate {
    pub notice: Option<Notice>,
}
