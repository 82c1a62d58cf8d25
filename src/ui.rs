use crate::config::ToastConfig;
use crate::models::Snapshot;

pub fn render_page(snapshot: &Snapshot, config: &ToastConfig) -> String {
    let attrs = &config.state_attributes;
    let state_element = format!(
        r#"<div id="{id}" hidden {streak}="{s}" {can}="{c}" {claimed}="{t}" {next}="{n}"></div>"#,
        id = config.state_element_id,
        streak = attrs.streak,
        s = snapshot.streak,
        can = attrs.can_claim,
        c = flag(snapshot.can_claim),
        claimed = attrs.claimed_today,
        t = flag(snapshot.claimed_today),
        next = attrs.next_reward,
        n = snapshot.next_reward,
    );

    PAGE_HTML
        .replace("{{STATE}}", &state_element)
        .replace("{{DAYS}}", &render_days(snapshot, config))
        .replace("{{STATUS}}", status_line(snapshot))
        .replace("{{BONUS}}", &config.schedule.bonus.to_string())
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn render_days(snapshot: &Snapshot, config: &ToastConfig) -> String {
    config
        .schedule
        .amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| {
            let done = (index as i64) < snapshot.streak;
            let next = index as i64 == snapshot.streak && snapshot.can_claim;
            let class = match (done, next) {
                (true, _) => "day done",
                (false, true) => "day next",
                _ => "day",
            };
            format!(
                r#"<li class="{class}"><span class="label">Day {}</span><span class="value">€{amount}</span></li>"#,
                index + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn status_line(snapshot: &Snapshot) -> &'static str {
    if snapshot.claimed_today {
        "Today's reward is already in your wallet."
    } else if snapshot.can_claim {
        "Your reward for today is ready."
    } else {
        "Finish today's tasks to unlock the reward."
    }
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sign-in Reward</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .days {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      grid-template-columns: repeat(5, 1fr);
      gap: 12px;
    }

    .day {
      background: white;
      border-radius: 18px;
      padding: 14px 10px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
      text-align: center;
    }

    .day .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .day .value {
      font-size: 1.3rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .day.done {
      background: var(--accent-2);
    }

    .day.done .label,
    .day.done .value {
      color: white;
    }

    .day.next {
      border-color: var(--accent);
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      width: 100%;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    .bonus {
      margin: 0;
      font-size: 0.95rem;
      color: #6b645d;
    }
  </style>
</head>
<body>
  {{STATE}}
  <main class="app">
    <header>
      <h1>Daily sign-in reward</h1>
      <p class="subtitle">{{STATUS}}</p>
    </header>
    <ol class="days">
        {{DAYS}}
    </ol>
    <p class="bonus">Complete all five days for an extra €{{BONUS}} bonus.</p>
    <form method="post" action="/signin_reward/claim/">
      <button type="submit">Claim today's reward</button>
    </form>
  </main>
  <script type="module">
    import init from "/pkg/signin_toast.js";
    init().catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_eligibility_attributes() {
        let snapshot = Snapshot {
            streak: 2,
            can_claim: true,
            claimed_today: false,
            next_reward: 50,
        };
        let html = render_page(&snapshot, &ToastConfig::default());
        assert!(html.contains(
            r#"<div id="signin-state" hidden data-streak="2" data-can-claim="1" data-claimed-today="0" data-next-reward="50"></div>"#
        ));
        assert!(html.contains(r#"<li class="day next"><span class="label">Day 3</span><span class="value">€50</span></li>"#));
        assert!(html.contains("extra €350 bonus"));
        assert!(!html.contains("{{"));
    }
}
