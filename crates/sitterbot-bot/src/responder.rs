//! Sitter-side reply resolution: figure out which offer a reply answers and
//! apply the accept/decline transition.

use sitterbot_bookings::{Booking, BookingError, BookingStore, BookingWindow, OfferStatus};
use sitterbot_sitters::{ReplyAction, Sitter, SitterRegistry};
use sitterbot_sms::{send_or_log, SmsSender};

use crate::error::Result;

/// How a sitter's reply body was understood.
enum ReplyToken {
    Answer(ReplyAction),
    /// 1-based pick from a previously presented list.
    Index(usize),
}

impl ReplyToken {
    fn parse(body: &str) -> Option<Self> {
        match body {
            "yes" | "y" => Some(Self::Answer(ReplyAction::Accept)),
            "no" | "n" => Some(Self::Answer(ReplyAction::Decline)),
            _ => body.parse::<usize>().ok().map(Self::Index),
        }
    }
}

/// Resolve an inbound reply from a registered sitter. The body arrives
/// lowercased and trimmed.
pub(crate) async fn handle_sitter(
    registry: &SitterRegistry,
    bookings: &BookingStore,
    sender: &dyn SmsSender,
    booker_address: &str,
    sitter: &Sitter,
    body: &str,
) -> Result<String> {
    let name = sitter.display_name();

    let Some(token) = ReplyToken::parse(body) else {
        return Ok(format!(
            "Hm, I'm not sure what you meant, {name}. Please write \"yes\", \"no\", \
             or a number (if there are any pending bookings)."
        ));
    };

    // Reload and order the candidate offers by window so a numeric follow-up
    // indexes the same list the clarification prompt showed.
    let all = bookings.all()?;
    let mut candidates: Vec<&Booking> = all
        .iter()
        .filter(|b| matches!(b.offer_for(&sitter.name), Some(o) if o.status == OfferStatus::Pending))
        .collect();
    candidates.sort_by_key(|b| b.window);

    if candidates.is_empty() {
        // A redundant yes/no after winning a booking confirms the existing
        // acceptance instead of claiming nothing is pending.
        if matches!(token, ReplyToken::Answer(_)) {
            if let Some(won) = all
                .iter()
                .filter(|b| b.accepted_by() == Some(sitter.name.as_str()))
                .max_by_key(|b| b.window)
            {
                return Ok(format!("You already accepted {}, {name}!", won.window));
            }
        }
        return Ok(format!(
            "Sorry, {name}, it looks like either that gig is already booked \
             or there aren't any pending gigs."
        ));
    }

    let (window, action) = match token {
        ReplyToken::Answer(action) => {
            if candidates.len() == 1 {
                (candidates[0].window, action)
            } else {
                registry.set_pending_action(&sitter.name, Some(action))?;
                return Ok(clarify(&candidates, action));
            }
        }
        ReplyToken::Index(pick) => {
            let Some(action) = sitter.pending_action else {
                return Ok(format!(
                    "Hm, I'm not sure what you meant, {name}. \
                     Please write \"yes\" or \"no\" first."
                ));
            };
            match pick.checked_sub(1).and_then(|i| candidates.get(i)) {
                Some(chosen) => (chosen.window, action),
                // Out of range: keep the stored action and ask again.
                None => return Ok(clarify(&candidates, action)),
            }
        }
    };

    if sitter.pending_action.is_some() {
        registry.set_pending_action(&sitter.name, None)?;
    }

    apply(bookings, sender, booker_address, sitter, window, action).await
}

/// Apply the transition and phrase the outcome.
async fn apply(
    bookings: &BookingStore,
    sender: &dyn SmsSender,
    booker_address: &str,
    sitter: &Sitter,
    window: BookingWindow,
    action: ReplyAction,
) -> Result<String> {
    let name = sitter.display_name();
    let accept = action == ReplyAction::Accept;

    match bookings.resolve_offer(&window, &sitter.name, accept) {
        Ok(_) if accept => {
            send_or_log(
                sender,
                booker_address,
                format!("{name} agreed to babysit on {window}!"),
            )
            .await;
            Ok(format!("Awesome, {name}!  See you on {window}."))
        }
        Ok(_) => Ok(format!("Okay, no problem, {name}!  Next time.")),
        Err(BookingError::AlreadyResolved {
            status: OfferStatus::Accepted,
            ..
        }) => Ok(format!("You already accepted {window}, {name}!")),
        Err(
            BookingError::AlreadyBooked { .. }
            | BookingError::NoSuchOffer { .. }
            | BookingError::AlreadyResolved { .. },
        ) => Ok(format!(
            "Sorry, {name}, it looks like {window} is already booked."
        )),
        Err(e) => Err(e.into()),
    }
}

fn clarify(candidates: &[&Booking], action: ReplyAction) -> String {
    let list = candidates
        .iter()
        .enumerate()
        .map(|(i, b)| format!("{}) {}", i + 1, b.window))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Sorry, which booking did you want to {action}? {list}")
}
