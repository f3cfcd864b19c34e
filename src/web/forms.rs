use actix_web::web;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::common::FormError;
use crate::models::{
    ActivityCreate, Amount, BannerCreate, CharacterReference, CustomPageCreate,
    FinancialRecordCreate, HistoryContent, Member, MemberType, PromotionCreate, Requirements,
    TransactionKind, WebsiteSettings,
};
use crate::services::{ActivityMedia, Registration};
use crate::web::multipart::MultipartData;

/// Urlencoded body of an admin mutation. Decoding errors are held back until
/// the session has been checked.
pub type AdminForm<T> = Result<web::Form<T>, actix_web::Error>;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

/// `?notice=<code>[&detail=..]` left by a redirect after a form post.
#[derive(Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub detail: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterQuery {
    #[serde(rename = "type")]
    pub member_type: Option<String>,
    pub done: Option<String>,
}

#[derive(Deserialize)]
pub struct MembersQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<String>,
    pub status: Option<String>,
    pub notice: Option<String>,
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(value)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| FormError::Invalid {
        field,
        reason: e.to_string(),
    })
}

/// Blank means "no date".
fn optional_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, value).map(Some)
    }
}

#[derive(Deserialize)]
pub struct FinancialForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
}

impl FinancialForm {
    pub fn to_create(&self) -> Result<FinancialRecordCreate, FormError> {
        let kind: TransactionKind =
            self.kind.parse().map_err(|reason| FormError::Invalid { field: "type", reason })?;
        let amount: Amount = required("amount", &self.amount)?
            .parse()
            .map_err(|reason| FormError::Invalid { field: "amount", reason })?;

        Ok(FinancialRecordCreate {
            kind,
            amount,
            category: required("category", &self.category)?.to_string(),
            description: self.description.trim().to_string(),
            date: parse_date("date", required("date", &self.date)?)?,
        })
    }
}

#[derive(Deserialize)]
pub struct SettingsForm {
    pub site_title: String,
    pub site_subtitle: String,
    pub motto: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub location: String,
    pub show_banner: Option<String>,
    pub maintenance_mode: Option<String>,
}

impl SettingsForm {
    pub fn to_settings(&self) -> WebsiteSettings {
        WebsiteSettings {
            site_title: self.site_title.trim().to_string(),
            site_subtitle: self.site_subtitle.trim().to_string(),
            motto: self.motto.trim().to_string(),
            contact_email: self.contact_email.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            location: self.location.trim().to_string(),
            show_banner: self.show_banner.is_some(),
            maintenance_mode: self.maintenance_mode.is_some(),
            updated_at: None,
        }
    }
}

#[derive(Deserialize)]
pub struct HistoryForm {
    pub beginning: String,
    pub growth: String,
    pub present: String,
    pub commitment: String,
}

impl HistoryForm {
    pub fn to_history(&self) -> HistoryContent {
        HistoryContent {
            beginning: self.beginning.trim().to_string(),
            growth: self.growth.trim().to_string(),
            present: self.present.trim().to_string(),
            commitment: self.commitment.trim().to_string(),
            updated_at: None,
        }
    }
}

#[derive(Deserialize)]
pub struct PageForm {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub order: Option<String>,
    pub show_in_nav: Option<String>,
}

impl PageForm {
    pub fn to_create(&self) -> Result<CustomPageCreate, FormError> {
        let order = match self.order.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<i32>().map_err(|e| FormError::Invalid {
                field: "order",
                reason: e.to_string(),
            })?,
        };

        Ok(CustomPageCreate {
            title: required("title", &self.title)?.to_string(),
            slug: self.slug.as_deref().unwrap_or_default().trim().to_string(),
            content: self.content.clone(),
            order,
            show_in_nav: self.show_in_nav.is_some(),
        })
    }
}

#[derive(Deserialize)]
pub struct PromotionForm {
    pub title: String,
    pub description: String,
    pub valid_until: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<String>,
}

impl PromotionForm {
    pub fn to_create(&self) -> Result<PromotionCreate, FormError> {
        Ok(PromotionCreate {
            title: required("title", &self.title)?.to_string(),
            description: self.description.trim().to_string(),
            valid_until: optional_date(
                "valid_until",
                self.valid_until.as_deref().unwrap_or_default(),
            )?,
            image_url: self.image_url.as_deref().unwrap_or_default().trim().to_string(),
            active: self.active.is_some(),
        })
    }
}

pub fn banner_from_multipart(
    data: &MultipartData,
    image_url: String,
) -> Result<BannerCreate, FormError> {
    Ok(BannerCreate {
        title: required("title", data.text("title"))?.to_string(),
        description: data.text("description").to_string(),
        image_url,
        link: data.text("link").to_string(),
        active: data.checked("active"),
    })
}

pub fn activity_from_multipart(
    data: &MultipartData,
    media: ActivityMedia,
) -> Result<ActivityCreate, FormError> {
    Ok(ActivityCreate {
        title: required("title", data.text("title"))?.to_string(),
        description: data.text("description").to_string(),
        date: optional_date("date", data.text("date"))?,
        location: data.text("location").to_string(),
        photos: media.photos,
        videos: media.videos,
    })
}

/// Field names accepted by the registration form that are not plain
/// `Member` strings are handled here; everything else is ignored.
fn apply_member_field(member: &mut Member, name: &str, value: &str) -> Result<(), FormError> {
    let value = value.trim();
    let text = value.to_string();

    match name {
        "member_type" => {
            member.member_type = value.parse::<MemberType>().map_err(|reason| {
                FormError::Invalid {
                    field: "member_type",
                    reason,
                }
            })?;
        }
        "sponsor" => member.sponsor = text,
        "chapter" => member.chapter = text,
        "province_city" => member.province_city = text,
        "region" => member.region = text,
        "last_name" => member.last_name = text,
        "first_name" => member.first_name = text,
        "middle_name" => member.middle_name = text,
        "pseudonym" => member.pseudonym = text,
        "email" => member.email = text,
        "cp_tel_no" => member.cp_tel_no = text,
        "provincial_address" => member.provincial_address = text,
        "city_address" => member.city_address = text,
        "office_business_address" => member.office_business_address = text,
        "occupation" => member.occupation = text,
        // Unreadable dates are left empty and reported as missing later.
        "date_of_birth" => {
            member.date_of_birth = optional_date("date_of_birth", value).ok().flatten();
        }
        "place_of_birth" => member.place_of_birth = text,
        "age" => {
            member.age = if value.is_empty() {
                None
            } else {
                // An unreadable age is derived from the birth date instead.
                value.parse::<i32>().ok()
            };
        }
        "sex" => member.sex = text,
        "civil_status" => member.civil_status = text,
        "religion" => member.religion = text,
        "dialect" => member.dialect = text,
        "height" => member.height = text,
        "weight" => member.weight = text,
        "blood_type" => member.blood_type = text,
        "phlt_no" => member.phlt_no = text,
        "sss_no" => member.sss_no = text,
        "spouse_name" => member.spouse_name = text,
        "number_of_children" => member.number_of_children = text,
        "spouse_occupation" => member.spouse_occupation = text,
        "spouse_company" => member.spouse_company = text,
        "father_name" => member.father_name = text,
        "mother_name" => member.mother_name = text,
        "emergency_contact_name" => member.emergency_contact_name = text,
        "emergency_relationship" => member.emergency_relationship = text,
        "emergency_address" => member.emergency_address = text,
        "emergency_tel_cp_no" => member.emergency_tel_cp_no = text,
        _ => apply_nested_field(member, name, text),
    }

    Ok(())
}

/// `<level>_school|course|date_completed` and `reference_<n>_name|address|contact`.
fn apply_nested_field(member: &mut Member, name: &str, text: String) {
    if let Some(rest) = name.strip_prefix("reference_") {
        let Some((slot, part)) = rest.split_once('_') else {
            return;
        };
        let Ok(slot) = slot.parse::<usize>() else {
            return;
        };
        if slot == 0 || slot > Member::REFERENCE_SLOTS {
            return;
        }
        if member.references.len() < slot {
            member.references.resize(slot, CharacterReference::default());
        }
        let reference = &mut member.references[slot - 1];
        match part {
            "name" => reference.name = text,
            "address" => reference.address = text,
            "contact" => reference.contact = text,
            _ => {}
        }
        return;
    }

    for level in crate::models::Education::LEVELS {
        let Some(part) = name
            .strip_prefix(level)
            .and_then(|rest| rest.strip_prefix('_'))
        else {
            continue;
        };
        if let Some(record) = member.education.level_mut(level) {
            match part {
                "school" => record.school = text,
                "course" => record.course = text,
                "date_completed" => record.date_completed = text,
                _ => {}
            }
        }
        return;
    }
}

/// Builds a registration from the multipart body. Only parsing happens here;
/// required fields are checked when the member is registered.
pub fn registration_from_multipart(data: &MultipartData) -> Result<Registration, FormError> {
    let mut member = Member::default();

    if data.text("member_type").is_empty() {
        return Err(FormError::Missing("member_type"));
    }

    for (name, value) in data.texts() {
        apply_member_field(&mut member, name, value)?;
    }

    for (name, _) in Requirements::FIELDS {
        member.requirements.set(name, data.checked(name));
    }

    // Trailing blank reference slots are not worth storing.
    while member
        .references
        .last()
        .is_some_and(|r| r.name.is_empty() && r.address.is_empty() && r.contact.is_empty())
    {
        member.references.pop();
    }

    Ok(Registration {
        member,
        photo: data.file("photo").cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn financial_form_parses_fixed_point_amounts() {
        let form = FinancialForm {
            kind: "OUT".to_string(),
            amount: "12.5".to_string(),
            category: "Events".to_string(),
            description: "Hall rental".to_string(),
            date: "2025-03-01".to_string(),
        };

        let create = form.to_create().unwrap();
        assert_eq!(create.kind, TransactionKind::Out);
        assert_eq!(create.amount, Amount::from_fils(12_500));
    }

    #[test]
    fn financial_form_rejects_four_decimals() {
        let form = FinancialForm {
            kind: "IN".to_string(),
            amount: "1.2345".to_string(),
            category: "Donations".to_string(),
            description: "Gift".to_string(),
            date: "2025-03-01".to_string(),
        };

        assert!(matches!(
            form.to_create(),
            Err(FormError::Invalid { field: "amount", .. })
        ));
    }

    #[test]
    fn page_form_defaults_order_to_zero() {
        let form = PageForm {
            title: "About Us".to_string(),
            slug: None,
            content: "<p>Hi</p>".to_string(),
            order: Some(String::new()),
            show_in_nav: Some("on".to_string()),
        };

        let create = form.to_create().unwrap();
        assert_eq!(create.order, 0);
        assert_eq!(create.slug, "");
        assert!(create.show_in_nav);
    }

    #[test]
    fn registration_maps_nested_fields() {
        let data = MultipartData::from_parts(
            &[
                ("member_type", "Associate"),
                ("first_name", " Ana "),
                ("college_school", "UP Diliman"),
                ("reference_2_name", "Jose"),
                ("has_nbi_clearance", "on"),
                ("age", ""),
            ],
            Vec::new(),
        );

        let registration = registration_from_multipart(&data).unwrap();
        let member = registration.member;

        assert_eq!(member.member_type, MemberType::Associate);
        assert_eq!(member.first_name, "Ana");
        assert_eq!(member.education.college.school, "UP Diliman");
        assert_eq!(member.references.len(), 2);
        assert_eq!(member.references[1].name, "Jose");
        assert!(member.requirements.has_nbi_clearance);
        assert!(!member.requirements.has_pnp_clearance);
        assert_eq!(member.age, None);
        assert!(registration.photo.is_none());
    }

    #[test]
    fn registration_needs_a_category() {
        let data = MultipartData::from_parts(&[("first_name", "Ana")], Vec::new());
        assert_eq!(
            registration_from_multipart(&data).unwrap_err(),
            FormError::Missing("member_type")
        );
    }
}
