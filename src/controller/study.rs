use tracing::debug;

use crate::error::{Error, Result};
use crate::hit::{Control, Hit, NodeId, StudyLayout};
use crate::router::View;
use crate::session::{Session, Side};
use crate::store::KvStore;

/// What a pointer click on the study screen did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Flipped,
    Pressed(Control),
    Ignored,
}

fn ensure_study<S: KvStore>(session: &Session<S>, action: &'static str) -> Result<()> {
    if session.view() == View::Study {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            from: session.view(),
            action,
        })
    }
}

fn card_count<S: KvStore>(session: &Session<S>) -> Result<usize> {
    Ok(session.open_deck()?.cards.len())
}

pub fn flip<S: KvStore>(session: &mut Session<S>) -> Result<()> {
    ensure_study(session, "flip")?;
    session.study.side = session.study.side.flipped();
    Ok(())
}

/// Step back one card. No-op on the first card.
pub fn prev<S: KvStore>(session: &mut Session<S>) -> Result<bool> {
    ensure_study(session, "go to the previous card")?;
    if session.study.index == 0 {
        return Ok(false);
    }
    session.study.index -= 1;
    session.study.side = Side::Front;
    Ok(true)
}

/// Step forward one card. No-op on the last card.
pub fn next<S: KvStore>(session: &mut Session<S>) -> Result<bool> {
    ensure_study(session, "go to the next card")?;
    if session.study.index + 1 >= card_count(session)? {
        return Ok(false);
    }
    session.study.index += 1;
    session.study.side = Side::Front;
    Ok(true)
}

pub fn exit<S: KvStore>(session: &mut Session<S>) -> Result<()> {
    session.router.exit_study()?;
    session.study.side = Side::Front;
    Ok(())
}

/// Handle a click on `target`. Anything inside a button runs that button;
/// anything else inside the card region flips the card.
pub fn click<S: KvStore>(
    session: &mut Session<S>,
    layout: &StudyLayout,
    target: NodeId,
) -> Result<ClickOutcome> {
    ensure_study(session, "click the card")?;
    match layout.tree.classify(target, layout.region) {
        Hit::Surface => {
            flip(session)?;
            Ok(ClickOutcome::Flipped)
        }
        Hit::Control(c) => {
            debug!(control = ?c, "study button pressed");
            match c {
                Control::Prev => {
                    prev(session)?;
                }
                Control::Next => {
                    next(session)?;
                }
                Control::Back => exit(session)?,
            }
            Ok(ClickOutcome::Pressed(c))
        }
        Hit::Outside => Ok(ClickOutcome::Ignored),
    }
}

/// `"<index+1> / <count>"`.
pub fn progress<S: KvStore>(session: &Session<S>) -> Result<String> {
    Ok(format!("{} / {}", session.study.index + 1, card_count(session)?))
}
