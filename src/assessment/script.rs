// src/assessment/script.rs
// Canned questionnaire used when no live model is configured

use crate::session::QUESTION_COUNT;

pub const SCRIPTED_QUESTIONS: [&str; QUESTION_COUNT] = [
    "Thank you for starting this AI readiness assessment! I'm your AI Business Consultant.

**Question 1 of 14: Business Context**

Let's begin by understanding your business. What industry does your company operate in, and what are the main products or services you offer?",
    "Great, thank you for that context!

**Question 2 of 14: Business Pain Points**

What are the top 2-3 operational challenges or pain points your business currently faces? These could be related to efficiency, costs, customer experience, or any other area where you see room for improvement.",
    "Those are very common challenges that AI can often help address.

**Question 3 of 14: Data Infrastructure**

How would you describe your current data infrastructure? Do you have centralized data storage, and how accessible is your business data for analysis?",
    "Thank you for sharing that.

**Question 4 of 14: Data Quality**

How would you rate the quality and consistency of your business data? Is it well-structured, clean, and regularly maintained?",
    "I see. Data quality is crucial for AI success.

**Question 5 of 14: Technical Capabilities**

Does your organization have in-house technical capabilities (developers, data analysts, IT team) that could support AI implementation, or would you rely primarily on external partners?",
    "That's helpful context.

**Question 6 of 14: Process Documentation**

How well-documented are your core business processes? Are there standard operating procedures in place?",
    "Good to know.

**Question 7 of 14: Change Management**

How would you describe your organization's culture when it comes to adopting new technologies? Is there generally openness to change?",
    "Change readiness is important for successful AI adoption.

**Question 8 of 14: Budget Considerations**

What level of investment is your organization prepared to consider for an initial AI pilot project?

A) Under $10,000
B) $10,000 - $50,000
C) $50,000 - $150,000
D) Over $150,000",
    "Thank you for that information.

**Question 9 of 14: Timeline Expectations**

What is your expected timeline for seeing results from an AI implementation?

A) 1-3 months (quick wins)
B) 3-6 months
C) 6-12 months
D) 12+ months (strategic transformation)",
    "**Question 10 of 14: AI Readiness Self-Assessment**

Based on your organization's current state, which best describes your self-assessed AI readiness level?

A) **Beginner** - Just starting to learn about AI possibilities
B) **Intermediate** - Some understanding, exploring use cases
C) **Advanced** - Dedicated team, some AI implementations in place
D) **Expert** - AI is already core to our strategy",
    "Thank you for that honest self-assessment.

**Question 11 of 14: Strategic Intent**

What is the primary goal of your interest in AI?

A) **Experimentation** - Learn about AI, run small pilots
B) **Tool Adoption** - Solve specific business problems
C) **Strategic Transformation** - Build long-term competitive advantage through AI",
    "**Question 12 of 14: Priority Areas**

Which business function would you prioritize for an initial AI pilot?

A) Customer Service / Support
B) Sales & Marketing
C) Operations / Manufacturing
D) Finance / Administration
E) HR / People Operations
F) Product Development",
    "**Question 13 of 14: Success Metrics**

How would you measure success for an AI pilot project? What would make it worthwhile for your organization?",
    "**Question 14 of 14: Additional Context**

Is there anything else you'd like to share about your business situation, challenges, or AI aspirations that would help me provide better recommendations?",
];

/// Closing report, laid out with the same headings the live model is asked for
pub const SCRIPTED_REPORT: &str = "### AI Pilot Project Readiness Report for Your Company

**Executive Summary:**
Your organization shows **moderate AI readiness** with strong potential for a successful pilot. Clear operational pain points and supportive leadership outweigh gaps in data consolidation and process documentation.

**Readiness Assessment Scorecard:**

| Assessment Dimension | Score (1-5) | Key Observations |
|---------------------|-------------|------------------|
| Business Pain Points & Opportunities | 4.0 | Clear, addressable challenges identified |
| Data Readiness | 3.0 | Moderate - some consolidation needed |
| Organizational Readiness | 3.5 | Good foundation, change management support needed |
| Process Maturity | 3.2 | Processes exist but documentation could improve |
| Strategic Priorities | 3.8 | Well-defined priorities and success metrics |
| AI Strategic Intent | Tool Adoption | Focused on solving specific business problems |

**Overall Readiness Score: 3.5/5**

**Prioritized AI Pilot Project Recommendations:**

**1. Top Priority: Intelligent Customer Support Assistant**
- **Recommended Pilot Project:** An AI assistant that answers routine customer inquiries around the clock and escalates complex issues with full context.
- **Business Impact:** 40-60% faster response times and roughly 30% fewer support tickets.
- **Why it's a good fit:** Your pain points are concentrated in support volume and the required data already exists in your ticketing history.
- **Implementation Approach:** Audit support data and FAQs, configure the assistant on your knowledge base, pilot with a limited customer segment, then iterate.
- **Budget Estimate:** $15,000 - $35,000

**2. Secondary Priority: Sales Intelligence & Lead Scoring**
- **Recommended Pilot Project:** Score and prioritize leads from CRM history and prospect behavior.
- **Business Impact:** 25-40% improvement in lead conversion rates.
- **Why it's a good fit:** Strategic priorities emphasize revenue growth and CRM data is reasonably structured.
- **Implementation Approach:** Integrate CRM data, define the ideal customer profile, train a scoring model, add dashboards.
- **Budget Estimate:** $25,000 - $50,000

**3. Exploratory Priority: Document Processing Automation**
- **Recommended Pilot Project:** Extract and classify data from invoices, contracts and reports.
- **Business Impact:** 70-80% reduction in manual data entry.
- **Why it's a good fit:** High-volume manual processes were highlighted, though documentation maturity needs work first.
- **Implementation Approach:** Identify document types, configure extraction templates, integrate with existing workflows.
- **Budget Estimate:** $10,000 - $25,000

**Next Steps:**
1. Review this report with key stakeholders.
2. Select one pilot project and run a detailed data audit for it.
3. Schedule a follow-up call to discuss the recommendations.";

/// Canned assistant reply for a session that has already been asked
/// `progress` questions
pub fn scripted_response(progress: usize) -> &'static str {
    SCRIPTED_QUESTIONS
        .get(progress)
        .copied()
        .unwrap_or(SCRIPTED_REPORT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::prompts::is_completion;

    #[test]
    fn test_questions_in_order() {
        for (i, question) in SCRIPTED_QUESTIONS.iter().enumerate() {
            assert!(question.contains(&format!("Question {} of 14", i + 1)));
            assert!(!is_completion(question));
        }
    }

    #[test]
    fn test_report_after_last_question() {
        assert_eq!(scripted_response(0), SCRIPTED_QUESTIONS[0]);
        assert_eq!(scripted_response(13), SCRIPTED_QUESTIONS[13]);
        assert_eq!(scripted_response(14), SCRIPTED_REPORT);
        assert_eq!(scripted_response(40), SCRIPTED_REPORT);
        assert!(is_completion(SCRIPTED_REPORT));
    }
}
