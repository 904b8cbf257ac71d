use crate::models::Posting;

/// Organization size value that gets the red highlight in every template.
const LARGE_ENTERPRISE: &str = "대기업";

/// Application portal the call-to-action button links to.
const PORTAL_URL: &str = "https://portal.uniwep.kr/postings";

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<li style=\"margin-bottom: 10px;\"><strong style=\"color: #0056b3;\">{}:</strong> <span style=\"color: #000;\">{}</span></li>",
        label, value
    )
}

fn opt_row(label: &str, value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(|v| detail_row(label, v))
        .unwrap_or_default()
}

// Only the large-enterprise size is worth calling out; other sizes are noise.
fn size_row(size: Option<&str>) -> String {
    match size {
        Some(s) if s == LARGE_ENTERPRISE => format!(
            "<li style=\"margin-bottom: 10px;\"><strong style=\"color: #0056b3;\">조직 규모:</strong> <span style=\"color: red; font-weight: bold;\">{}</span></li>",
            s
        ),
        _ => String::new(),
    }
}

/// Renders an amount with thousands separators (500000 -> "500,000").
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

// A zero amount means the crawler found no compensation figure, so the row
// is dropped rather than rendered as "0".
fn support_row(posting: &Posting) -> String {
    match &posting.support {
        Some(support) => match (support.period.as_deref(), support.amount) {
            (Some(period), Some(amount)) if amount != 0 => {
                detail_row("급여", &format!("{} {}", period, format_amount(amount)))
            }
            _ => String::new(),
        },
        None => String::new(),
    }
}

/// Picks the major text for the qualification block. Free-text announced
/// majors win unless they just point back at the qualification section
/// (contain "자격"), in which case the structured list is shown instead.
fn eligibility_major_text(posting: &Posting) -> String {
    let structured = posting
        .qualifications
        .as_ref()
        .and_then(|q| q.majors.as_ref())
        .map(|majors| majors.join(", "))
        .unwrap_or_default();
    match posting.announced_majors.as_deref().filter(|a| !a.is_empty()) {
        Some(announced) if !announced.contains("자격") => announced.to_string(),
        _ => structured,
    }
}

fn qualification_rows(posting: &Posting) -> String {
    let q = match &posting.qualifications {
        Some(q) => q,
        None => return String::new(),
    };
    let major_text = eligibility_major_text(posting);
    let mut rows = String::new();
    if !major_text.is_empty() {
        rows.push_str(&detail_row("전공", &major_text));
    }
    rows.push_str(&opt_row("학년", q.grade.as_deref()));
    rows.push_str(&opt_row("기타", q.etc.as_deref()));
    format!(
        "<ul style=\"list-style: none; padding: 0; margin: 0;\">{}</ul>",
        rows
    )
}

fn interview_rows(posting: &Posting) -> String {
    let info = match &posting.interview {
        Some(info) => info,
        None => return String::new(),
    };
    let mut rows = String::new();
    rows.push_str(&opt_row("면접 유형", info.interview_type.as_deref()));
    rows.push_str(&opt_row("지원서 제출 기간", info.submission_period.as_deref()));
    rows.push_str(&opt_row("면접 전형", info.interview_round.as_deref()));
    rows.push_str(&opt_row("최종 발표", info.final_announcement.as_deref()));
    format!(
        "<ul style=\"list-style: none; padding: 0; margin: 0;\">{}</ul>",
        rows
    )
}

fn posting_rows(posting: &Posting) -> String {
    let recruit_count = posting.recruit_count.map(|n| n.to_string());
    let job_title = posting
        .details
        .as_ref()
        .and_then(|d| d.job_title.as_deref());
    let mut rows = String::new();
    rows.push_str(&size_row(posting.organization_size.as_deref()));
    rows.push_str(&detail_row("기관 이름", &posting.organization_name));
    rows.push_str(&opt_row("부서", posting.department.as_deref()));
    rows.push_str(&opt_row("직무명", job_title));
    rows.push_str(&opt_row("위치", posting.location.as_deref()));
    rows.push_str(&opt_row("유형", posting.job_type.as_deref()));
    rows.push_str(&opt_row("모집 인원", recruit_count.as_deref()));
    rows.push_str(&support_row(posting));
    rows.push_str(&opt_row(
        "지원 마감일",
        posting.application_deadline.as_deref(),
    ));
    rows.push_str(&opt_row("시작일", posting.start_date.as_deref()));
    rows.push_str(&opt_row("종료일", posting.end_date.as_deref()));
    format!(
        "<ul style=\"list-style: none; padding: 0; margin-top: 20px;\">{}</ul>",
        rows
    )
}

/// Full detail block for one posting: every row plus the qualification and
/// interview sections.
fn posting_detail(posting: &Posting) -> String {
    let qualification = qualification_rows(posting);
    let interview = interview_rows(posting);
    let mut sections = String::new();
    if !qualification.is_empty() {
        sections.push_str("<h3 style=\"color: #0056b3;\">자격 요건</h3>");
        sections.push_str(&qualification);
    }
    if !interview.is_empty() {
        sections.push_str("<h3 style=\"color: #0056b3;\">면접 정보</h3>");
        sections.push_str(&interview);
    }
    format!(
        "{}<div style=\"margin-top: 20px; padding-top: 10px; border-top: 1px solid #ddd;\">{}</div>",
        posting_rows(posting),
        sections
    )
}

// Shorter row set for the aggregated listing; the structured major list is
// shown as-is here, without the announced-text fallback.
fn compact_rows(posting: &Posting) -> String {
    let recruit_count = posting.recruit_count.map(|n| n.to_string());
    let job_title = posting
        .details
        .as_ref()
        .and_then(|d| d.job_title.as_deref());
    let majors = posting
        .qualifications
        .as_ref()
        .and_then(|q| q.majors.as_ref())
        .map(|majors| majors.join(", "));
    let mut rows = String::new();
    rows.push_str(&size_row(posting.organization_size.as_deref()));
    rows.push_str(&detail_row("기관 이름", &posting.organization_name));
    rows.push_str(&opt_row("부서", posting.department.as_deref()));
    rows.push_str(&opt_row("직무명", job_title));
    rows.push_str(&opt_row("전공", majors.as_deref()));
    rows.push_str(&opt_row("위치", posting.location.as_deref()));
    rows.push_str(&opt_row("모집 인원", recruit_count.as_deref()));
    rows.push_str(&support_row(posting));
    rows.push_str(&opt_row(
        "지원 마감일",
        posting.application_deadline.as_deref(),
    ));
    format!(
        "<ul style=\"list-style: none; padding: 0; margin: 0;\">{}</ul>",
        rows
    )
}

fn email_layout(name: &str, intro: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; background-color: #f4f4f4; margin: 0; padding: 0; color: #000;">
  <div style="max-width: 600px; margin: 20px auto; background: #ffffff; border: 1px solid #ddd; border-radius: 8px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1); overflow: hidden;">
    <div style="background-color: #0056b3; color: white; padding: 20px; text-align: center;">
      <h1 style="margin: 0; font-size: 24px;">UniWEP 현장실습 공고</h1>
    </div>
    <div style="padding: 20px;">
      <p style="color: #000;">안녕하세요 <strong style="color: #0056b3;">{name}</strong>님,</p>
      <p style="margin-bottom: 20px; color: #000;">{intro}</p>
      <div style="margin-top: 10px;">{body}</div>
      <div style="margin-top: 20px; text-align: center;">
        <a href="{portal}" style="display: inline-block; padding: 10px 20px; color: #0056b3; text-decoration: none; font-weight: bold; border: 1px solid #0056b3; border-radius: 5px;">지원하기</a>
      </div>
    </div>
    <div style="text-align: center; padding: 15px; background-color: #f9f9f9; font-size: 12px; color: #555;">
      <p>현장실습지원센터</p>
    </div>
  </div>
</body>
</html>"#,
        name = name,
        intro = intro,
        body = body,
        portal = PORTAL_URL,
    )
}

/// Per-recipient announcement for one newly indexed posting.
pub fn new_posting_email(name: &str, posting: &Posting) -> String {
    email_layout(
        name,
        "소속 학과와 학년에 적합한 새로운 공고가 추가되었습니다:",
        &posting_detail(posting),
    )
}

/// Aggregated mail listing every open posting matched to one student.
pub fn matched_postings_email(name: &str, postings: &[Posting]) -> String {
    let body: String = postings
        .iter()
        .enumerate()
        .map(|(i, posting)| {
            let border = if i + 1 < postings.len() {
                "border-bottom: 1px solid #ddd;"
            } else {
                ""
            };
            format!(
                "<div style=\"margin: 20px 0; padding-bottom: 20px; {}\">{}</div>",
                border,
                compact_rows(posting)
            )
        })
        .collect();
    email_layout(name, "소속 학과와 학년에 적합한 진행중인 공고입니다:", &body)
}

/// Full-detail digest for a tag scan, one block per posting.
pub fn tag_digest_email(name: &str, postings: &[Posting]) -> String {
    let body = postings
        .iter()
        .map(posting_detail)
        .collect::<Vec<_>>()
        .join("<hr style=\"border: 1px solid #ddd; margin: 20px 0;\">");
    email_layout(name, "관심 키워드에 맞는 진행중인 공고입니다:", &body)
}

/// `[dev] ` style marker, suppressed in production.
pub fn env_prefix(environment: &str) -> String {
    if environment == "prod" {
        String::new()
    } else {
        format!("[{}] ", environment)
    }
}

pub fn new_posting_subject(environment: &str) -> String {
    format!(
        "{}[현장실습] 새로운 공고를 확인해보세요",
        env_prefix(environment)
    )
}

pub fn matched_postings_subject(environment: &str) -> String {
    format!(
        "{}[현장실습] 진행 중인 공고를 확인해보세요",
        env_prefix(environment)
    )
}

/// Tag digests go out on the same schedule from every environment, so the
/// subject carries no environment marker.
pub fn tag_digest_subject() -> String {
    "[현장실습] 관심 키워드에 맞는 공고를 확인해보세요".to_string()
}

/// Operator alert for a newly indexed posting. Tagged with the environment
/// even in production so operators can tell deployments apart.
pub fn new_posting_alert(environment: &str, posting: &Posting) -> String {
    let announced = posting
        .qualifications
        .as_ref()
        .and_then(|q| q.majors.as_ref())
        .map(|majors| majors.join(", "))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] 신규 공고:\n- 기관: {}\n- 공고상 전공: {}\n- 전공: {}\n",
        environment, posting.organization_name, announced, posting.majors
    )
}

pub fn posting_send_summary(environment: &str, organization: &str, sent: usize) -> String {
    format!(
        "[{}] 신규 공고 이메일 전송 완료:\n- 기관: {}\n- 발송 건수: {}\n",
        environment, organization, sent
    )
}

pub fn profile_send_summary(environment: &str, name: &str, email: &str) -> String {
    format!(
        "[{}] 진행 공고 이메일 전송 완료:\n- 이름: {}\n- 이메일: {}\n",
        environment, name, email
    )
}

/// Tag-scan summary. Carries no environment marker.
pub fn tag_send_summary(name: &str, email: &str) -> String {
    format!(
        "관심 키워드 공고 이메일 전송 완료:\n- 이름: {}\n- 이메일: {}\n",
        name, email
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        GradeEligibility, InterviewInfo, MajorEligibility, Qualifications, SupportAmount,
    };

    fn create_posting() -> Posting {
        Posting {
            organization_name: "네오 로보틱스".to_string(),
            majors: MajorEligibility::Specific(vec!["컴퓨터소프트웨어학부".to_string()]),
            grades: GradeEligibility::Years(vec![3, 4]),
            organization_size: None,
            organization_description: None,
            location: Some("서울 성동구".to_string()),
            department: Some("로봇 제어팀".to_string()),
            job_type: Some("채용연계형".to_string()),
            recruit_count: Some(2),
            start_date: Some("2026-03-01".to_string()),
            end_date: Some("2026-06-30".to_string()),
            application_deadline: Some("2026-02-14".to_string()),
            announced_majors: None,
            qualifications: None,
            interview: None,
            details: None,
            support: None,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(999), "999");
        assert_eq!(format_amount(500000), "500,000");
        assert_eq!(format_amount(1234567), "1,234,567");
    }

    #[test]
    fn test_support_row_skips_zero_amount() {
        let mut posting = create_posting();
        posting.support = Some(SupportAmount {
            period: Some("월".to_string()),
            amount: Some(0),
        });
        let html = new_posting_email("김대성", &posting);
        assert!(!html.contains("급여"));

        posting.support = Some(SupportAmount {
            period: Some("월".to_string()),
            amount: Some(500000),
        });
        let html = new_posting_email("김대성", &posting);
        assert!(html.contains("월 500,000"));
    }

    #[test]
    fn test_large_enterprise_highlighted() {
        let mut posting = create_posting();
        posting.organization_size = Some("대기업".to_string());
        let html = new_posting_email("김대성", &posting);
        assert!(html.contains("color: red; font-weight: bold;\">대기업"));

        posting.organization_size = Some("중소기업".to_string());
        let html = new_posting_email("김대성", &posting);
        assert!(!html.contains("조직 규모"));
    }

    #[test]
    fn test_announced_majors_fallback() {
        let mut posting = create_posting();
        posting.qualifications = Some(Qualifications {
            majors: Some(vec!["수학과".to_string(), "물리학과".to_string()]),
            grade: None,
            etc: None,
            competence: None,
        });

        posting.announced_majors = Some("전체 학과".to_string());
        assert_eq!(eligibility_major_text(&posting), "전체 학과");

        posting.announced_majors = Some("지원 자격 참고".to_string());
        assert_eq!(eligibility_major_text(&posting), "수학과, 물리학과");

        posting.announced_majors = None;
        assert_eq!(eligibility_major_text(&posting), "수학과, 물리학과");
    }

    #[test]
    fn test_detail_sections_present() {
        let mut posting = create_posting();
        posting.qualifications = Some(Qualifications {
            majors: Some(vec!["수학과".to_string()]),
            grade: Some("3학년 이상".to_string()),
            etc: None,
            competence: None,
        });
        posting.interview = Some(InterviewInfo {
            interview_type: Some("대면".to_string()),
            submission_period: None,
            interview_round: None,
            final_announcement: None,
        });
        let html = new_posting_email("김대성", &posting);
        assert!(html.contains("자격 요건"));
        assert!(html.contains("면접 정보"));
        assert!(html.contains("3학년 이상"));
    }

    #[test]
    fn test_matched_postings_border_between_entries() {
        let postings = vec![create_posting(), create_posting()];
        let html = matched_postings_email("김대성", &postings);
        assert_eq!(html.matches("border-bottom: 1px solid #ddd;").count(), 1);
        assert!(html.contains("안녕하세요 <strong style=\"color: #0056b3;\">김대성</strong>님"));
    }

    #[test]
    fn test_subject_prefixing() {
        assert_eq!(
            new_posting_subject("dev"),
            "[dev] [현장실습] 새로운 공고를 확인해보세요"
        );
        assert_eq!(
            new_posting_subject("prod"),
            "[현장실습] 새로운 공고를 확인해보세요"
        );
        assert_eq!(
            matched_postings_subject("stage"),
            "[stage] [현장실습] 진행 중인 공고를 확인해보세요"
        );
        assert_eq!(
            tag_digest_subject(),
            "[현장실습] 관심 키워드에 맞는 공고를 확인해보세요"
        );
    }

    #[test]
    fn test_chat_message_prefixing() {
        let posting = create_posting();
        assert!(new_posting_alert("prod", &posting).starts_with("[prod] 신규 공고:"));
        assert!(posting_send_summary("dev", "네오 로보틱스", 0).contains("발송 건수: 0"));
        assert!(tag_send_summary("김대성", "kim@uniwep.kr").starts_with("관심 키워드"));
    }
}
